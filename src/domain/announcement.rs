//! Administrator announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};

/// Announcement identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementId(String);

impl AnnouncementId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for AnnouncementId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who an announcement is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementScope {
    /// Visible to participants
    #[default]
    Participant,
    /// Visible to everyone, including logged-out visitors
    All,
}

/// A broadcast message from the administrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    id: AnnouncementId,
    scope: AnnouncementScope,
    message: String,
    created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(scope: AnnouncementScope, message: impl Into<String>) -> Self {
        Self {
            id: AnnouncementId::generate(),
            scope,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &AnnouncementId {
        &self.id
    }

    pub fn scope(&self) -> AnnouncementScope {
        self.scope
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for Announcement {
    type Key = AnnouncementId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_creation() {
        let announcement =
            Announcement::new(AnnouncementScope::Participant, "Scores updated after match 4");

        assert_eq!(announcement.message(), "Scores updated after match 4");
        assert_eq!(announcement.scope(), AnnouncementScope::Participant);
    }

    #[test]
    fn test_scope_serialization() {
        assert_eq!(
            serde_json::to_string(&AnnouncementScope::Participant).unwrap(),
            "\"participant\""
        );
        assert_eq!(
            serde_json::to_string(&AnnouncementScope::All).unwrap(),
            "\"all\""
        );
    }
}
