//! League season history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};

/// Season record identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonRecordId(String);

impl SeasonRecordId {
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

impl StorageKey for SeasonRecordId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// One completed season in the league's hall of fame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRecord {
    id: SeasonRecordId,
    /// Ordering key for the history listing
    season_number: u32,
    event_name: String,
    champion_name: String,
    champion_team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl SeasonRecord {
    pub fn new(
        season_number: u32,
        event_name: impl Into<String>,
        champion_name: impl Into<String>,
        champion_team_name: impl Into<String>,
    ) -> Self {
        Self {
            id: SeasonRecordId::generate(),
            season_number,
            event_name: event_name.into(),
            champion_name: champion_name.into(),
            champion_team_name: champion_team_name.into(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> &SeasonRecordId {
        &self.id
    }

    pub fn season_number(&self) -> u32 {
        self.season_number
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn champion_name(&self) -> &str {
        &self.champion_name
    }

    pub fn champion_team_name(&self) -> &str {
        &self.champion_team_name
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_details(
        &mut self,
        season_number: u32,
        event_name: impl Into<String>,
        champion_name: impl Into<String>,
        champion_team_name: impl Into<String>,
        notes: Option<String>,
    ) {
        self.season_number = season_number;
        self.event_name = event_name.into();
        self.champion_name = champion_name.into();
        self.champion_team_name = champion_team_name.into();
        self.notes = notes;
    }
}

impl StorageEntity for SeasonRecord {
    type Key = SeasonRecordId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_record() {
        let record = SeasonRecord::new(3, "Winter Cup 2024", "Asha Rahman", "Asha's XI")
            .with_notes("Decided on the final match");

        assert_eq!(record.season_number(), 3);
        assert_eq!(record.champion_name(), "Asha Rahman");
        assert_eq!(record.notes(), Some("Decided on the final match"));
    }
}
