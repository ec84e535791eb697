//! Site-wide settings, stored as a single document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};

/// Fixed key of the settings singleton
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsKey(String);

impl SettingsKey {
    pub fn singleton() -> Self {
        Self("site".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SettingsKey {
    fn default() -> Self {
        Self::singleton()
    }
}

impl StorageKey for SettingsKey {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Site-wide toggles controlled by the administrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    id: SettingsKey,
    /// Whether participants may browse other rosters before the
    /// registration deadline passes
    show_participant_teams: bool,
    updated_at: DateTime<Utc>,
}

impl SiteSettings {
    pub fn new(show_participant_teams: bool) -> Self {
        Self {
            id: SettingsKey::singleton(),
            show_participant_teams,
            updated_at: Utc::now(),
        }
    }

    pub fn show_participant_teams(&self) -> bool {
        self.show_participant_teams
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_show_participant_teams(&mut self, show: bool) {
        self.show_participant_teams = show;
        self.updated_at = Utc::now();
    }
}

impl Default for SiteSettings {
    /// Teams stay hidden until the administrator opts in
    fn default() -> Self {
        Self::new(false)
    }
}

impl StorageEntity for SiteSettings {
    type Key = SettingsKey;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hides_teams() {
        assert!(!SiteSettings::default().show_participant_teams());
    }

    #[test]
    fn test_singleton_key() {
        let settings = SiteSettings::default();
        assert_eq!(settings.key().as_str(), "site");
    }

    #[test]
    fn test_toggle() {
        let mut settings = SiteSettings::default();
        settings.set_show_participant_teams(true);
        assert!(settings.show_participant_teams());
    }
}
