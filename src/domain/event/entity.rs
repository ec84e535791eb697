//! Event entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_event_name, validate_event_window, EventValidationError,
};
use crate::domain::roster::LINEUP_SIZE;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Event identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier (e.g. from a request path)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for EventId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// League classification; the foreign-player cap only binds domestic leagues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeagueType {
    #[default]
    Domestic,
    International,
}

impl LeagueType {
    pub fn is_domestic(&self) -> bool {
        matches!(self, Self::Domestic)
    }
}

impl std::fmt::Display for LeagueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domestic => write!(f, "domestic"),
            Self::International => write!(f, "international"),
        }
    }
}

/// Where an event sits relative to its registration and end times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    /// Registration is still open
    Upcoming,
    /// Registration closed, tournament in progress
    Running,
    /// Tournament end time has passed
    Finished,
}

/// Tournament event entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    league_type: LeagueType,
    registration_deadline: DateTime<Utc>,
    tournament_end_time: DateTime<Utc>,
    /// Exact number of VIP slots every roster must carry
    max_vip_players: u8,
    /// Cap on players picked from one real-world team
    max_players_from_single_team: u8,
    /// Cap on foreign players; None means unlimited (domestic leagues only)
    #[serde(skip_serializing_if = "Option::is_none")]
    max_foreign_players: Option<u8>,
    /// Replacement requests each roster may spend during the tournament
    max_replacements: u8,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event with default caps (1 VIP, 4 per team, 3 replacements)
    pub fn new(
        name: impl Into<String>,
        league_type: LeagueType,
        registration_deadline: DateTime<Utc>,
        tournament_end_time: DateTime<Utc>,
    ) -> Result<Self, EventValidationError> {
        let name = name.into();
        validate_event_name(&name)?;
        validate_event_window(registration_deadline, tournament_end_time)?;
        let now = Utc::now();

        Ok(Self {
            id: EventId::generate(),
            name,
            description: None,
            league_type,
            registration_deadline,
            tournament_end_time,
            max_vip_players: 1,
            max_players_from_single_team: 4,
            max_foreign_players: None,
            max_replacements: 3,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_max_vip_players(mut self, max: u8) -> Result<Self, EventValidationError> {
        if max as usize > LINEUP_SIZE {
            return Err(EventValidationError::VipQuotaTooLarge(LINEUP_SIZE));
        }
        self.max_vip_players = max;
        Ok(self)
    }

    pub fn with_max_players_from_single_team(mut self, max: u8) -> Self {
        self.max_players_from_single_team = max;
        self
    }

    pub fn with_max_foreign_players(mut self, max: Option<u8>) -> Self {
        self.max_foreign_players = max;
        self
    }

    pub fn with_max_replacements(mut self, max: u8) -> Self {
        self.max_replacements = max;
        self
    }

    // Getters

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn league_type(&self) -> LeagueType {
        self.league_type
    }

    pub fn registration_deadline(&self) -> DateTime<Utc> {
        self.registration_deadline
    }

    pub fn tournament_end_time(&self) -> DateTime<Utc> {
        self.tournament_end_time
    }

    pub fn max_vip_players(&self) -> u8 {
        self.max_vip_players
    }

    pub fn max_players_from_single_team(&self) -> u8 {
        self.max_players_from_single_team
    }

    pub fn max_foreign_players(&self) -> Option<u8> {
        self.max_foreign_players
    }

    pub fn max_replacements(&self) -> u8 {
        self.max_replacements
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Phase of the event at the given instant
    pub fn phase_at(&self, now: DateTime<Utc>) -> EventPhase {
        if now < self.registration_deadline {
            EventPhase::Upcoming
        } else if now < self.tournament_end_time {
            EventPhase::Running
        } else {
            EventPhase::Finished
        }
    }

    /// Whether rosters may still be created or edited
    pub fn registration_open(&self, now: DateTime<Utc>) -> bool {
        self.phase_at(now) == EventPhase::Upcoming
    }

    // Mutators (administrator edits)

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), EventValidationError> {
        let name = name.into();
        validate_event_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_league_type(&mut self, league_type: LeagueType) {
        self.league_type = league_type;
        self.touch();
    }

    pub fn set_window(
        &mut self,
        registration_deadline: DateTime<Utc>,
        tournament_end_time: DateTime<Utc>,
    ) -> Result<(), EventValidationError> {
        validate_event_window(registration_deadline, tournament_end_time)?;
        self.registration_deadline = registration_deadline;
        self.tournament_end_time = tournament_end_time;
        self.touch();
        Ok(())
    }

    pub fn set_max_vip_players(&mut self, max: u8) -> Result<(), EventValidationError> {
        if max as usize > LINEUP_SIZE {
            return Err(EventValidationError::VipQuotaTooLarge(LINEUP_SIZE));
        }
        self.max_vip_players = max;
        self.touch();
        Ok(())
    }

    pub fn set_max_players_from_single_team(&mut self, max: u8) {
        self.max_players_from_single_team = max;
        self.touch();
    }

    pub fn set_max_foreign_players(&mut self, max: Option<u8>) {
        self.max_foreign_players = max;
        self.touch();
    }

    pub fn set_max_replacements(&mut self, max: u8) {
        self.max_replacements = max;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Event {
    type Key = EventId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_event() -> Event {
        let now = Utc::now();
        Event::new(
            "Summer T20 Bash",
            LeagueType::Domestic,
            now + Duration::days(7),
            now + Duration::days(37),
        )
        .unwrap()
    }

    #[test]
    fn test_event_creation_defaults() {
        let event = sample_event();

        assert_eq!(event.name(), "Summer T20 Bash");
        assert_eq!(event.max_vip_players(), 1);
        assert_eq!(event.max_players_from_single_team(), 4);
        assert_eq!(event.max_replacements(), 3);
        assert!(event.max_foreign_players().is_none());
        assert!(event.league_type().is_domestic());
    }

    #[test]
    fn test_event_invalid_name() {
        let now = Utc::now();
        let result = Event::new(
            "",
            LeagueType::Domestic,
            now + Duration::days(7),
            now + Duration::days(37),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_event_inverted_window_rejected() {
        let now = Utc::now();
        let result = Event::new(
            "Backwards Cup",
            LeagueType::Domestic,
            now + Duration::days(37),
            now + Duration::days(7),
        );
        assert_eq!(result.unwrap_err(), EventValidationError::DeadlineAfterEnd);
    }

    #[test]
    fn test_event_phases() {
        let event = sample_event();
        let now = Utc::now();

        assert_eq!(event.phase_at(now), EventPhase::Upcoming);
        assert_eq!(
            event.phase_at(now + Duration::days(10)),
            EventPhase::Running
        );
        assert_eq!(
            event.phase_at(now + Duration::days(40)),
            EventPhase::Finished
        );
    }

    #[test]
    fn test_registration_open() {
        let event = sample_event();
        let now = Utc::now();

        assert!(event.registration_open(now));
        assert!(!event.registration_open(now + Duration::days(8)));
    }

    #[test]
    fn test_vip_quota_cannot_exceed_lineup() {
        let result = sample_event().with_max_vip_players(12);
        assert_eq!(
            result.unwrap_err(),
            EventValidationError::VipQuotaTooLarge(11)
        );
    }

    #[test]
    fn test_event_admin_edit_touches_updated_at() {
        let mut event = sample_event();
        let before = event.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));
        event.set_max_replacements(5);

        assert_eq!(event.max_replacements(), 5);
        assert!(event.updated_at() > before);
    }

    #[test]
    fn test_league_type_serialization() {
        assert_eq!(
            serde_json::to_string(&LeagueType::Domestic).unwrap(),
            "\"domestic\""
        );
        assert_eq!(
            serde_json::to_string(&LeagueType::International).unwrap(),
            "\"international\""
        );
    }
}
