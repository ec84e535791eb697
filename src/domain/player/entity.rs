//! Player entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_player_name, validate_points, PlayerValidationError};
use crate::domain::event::EventId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::CricketTeamId;

/// Player identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
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

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for PlayerId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role category used by the lineup rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCategory {
    Batsman,
    Wicketkeeper,
    AllRounder,
    Bowler,
}

impl PlayerCategory {
    /// Bowlers and all-rounders count toward the bowl-capable floor
    pub fn is_bowl_capable(&self) -> bool {
        matches!(self, Self::Bowler | Self::AllRounder)
    }
}

impl std::fmt::Display for PlayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Batsman => write!(f, "batsman"),
            Self::Wicketkeeper => write!(f, "wicketkeeper"),
            Self::AllRounder => write!(f, "all_rounder"),
            Self::Bowler => write!(f, "bowler"),
        }
    }
}

/// Nationality class; only matters for domestic-league foreign caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Nationality {
    #[default]
    Domestic,
    Foreign,
}

impl Nationality {
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Foreign)
    }
}

/// A selectable player in one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    event_id: EventId,
    team_id: CricketTeamId,
    /// Denormalised team name for display without a join
    team_name: String,
    name: String,
    category: PlayerCategory,
    nationality: Nationality,
    /// Per-period point values, append-only; None marks an unreported period
    points: Vec<Option<i64>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        event_id: EventId,
        team_id: CricketTeamId,
        team_name: impl Into<String>,
        name: impl Into<String>,
        category: PlayerCategory,
        nationality: Nationality,
    ) -> Result<Self, PlayerValidationError> {
        let name = name.into();
        validate_player_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: PlayerId::generate(),
            event_id,
            team_id,
            team_name: team_name.into(),
            name,
            category,
            nationality,
            points: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn team_id(&self) -> &CricketTeamId {
        &self.team_id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> PlayerCategory {
        self.category
    }

    pub fn nationality(&self) -> Nationality {
        self.nationality
    }

    pub fn points(&self) -> &[Option<i64>] {
        &self.points
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), PlayerValidationError> {
        let name = name.into();
        validate_player_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_category(&mut self, category: PlayerCategory) {
        self.category = category;
        self.touch();
    }

    pub fn set_nationality(&mut self, nationality: Nationality) {
        self.nationality = nationality;
        self.touch();
    }

    pub fn set_team(&mut self, team_id: CricketTeamId, team_name: impl Into<String>) {
        self.team_id = team_id;
        self.team_name = team_name.into();
        self.touch();
    }

    /// Replace the whole points sequence (administrator score entry)
    pub fn set_points(&mut self, points: Vec<Option<i64>>) -> Result<(), PlayerValidationError> {
        validate_points(&points)?;
        self.points = points;
        self.touch();
        Ok(())
    }

    /// Append one period's score
    pub fn record_period(&mut self, value: Option<i64>) -> Result<(), PlayerValidationError> {
        validate_points(std::slice::from_ref(&value))?;
        self.points.push(value);
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Player {
    type Key = PlayerId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player(category: PlayerCategory) -> Player {
        Player::new(
            EventId::generate(),
            CricketTeamId::generate(),
            "Mumbai Indians",
            "Test Player",
            category,
            Nationality::Domestic,
        )
        .unwrap()
    }

    #[test]
    fn test_player_creation() {
        let player = sample_player(PlayerCategory::Batsman);

        assert_eq!(player.name(), "Test Player");
        assert_eq!(player.team_name(), "Mumbai Indians");
        assert!(player.points().is_empty());
    }

    #[test]
    fn test_bowl_capable_categories() {
        assert!(PlayerCategory::Bowler.is_bowl_capable());
        assert!(PlayerCategory::AllRounder.is_bowl_capable());
        assert!(!PlayerCategory::Batsman.is_bowl_capable());
        assert!(!PlayerCategory::Wicketkeeper.is_bowl_capable());
    }

    #[test]
    fn test_set_points_rejects_negative() {
        let mut player = sample_player(PlayerCategory::Bowler);
        let result = player.set_points(vec![Some(12), Some(-3)]);
        assert_eq!(result.unwrap_err(), PlayerValidationError::NegativePoints);
    }

    #[test]
    fn test_record_period() {
        let mut player = sample_player(PlayerCategory::Bowler);

        player.record_period(Some(25)).unwrap();
        player.record_period(None).unwrap();

        assert_eq!(player.points(), &[Some(25), None]);
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&PlayerCategory::AllRounder).unwrap(),
            "\"all_rounder\""
        );
        assert_eq!(
            serde_json::to_string(&Nationality::Foreign).unwrap(),
            "\"foreign\""
        );
    }
}
