//! Roster aggregate: a participant's committed eleven for one event

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::validation::LINEUP_SIZE;
use crate::domain::event::EventId;
use crate::domain::player::PlayerId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Errors raised by roster construction and swap application
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterError {
    #[error("Team name cannot be empty")]
    EmptyTeamName,

    #[error("Team name cannot exceed {0} characters")]
    TeamNameTooLong(usize),

    #[error("A committed roster must hold exactly {0} players")]
    WrongSlotCount(usize),

    #[error("A player cannot appear twice in the same roster")]
    DuplicatePlayer,

    #[error("The outgoing player is not in this roster")]
    OutgoingNotInRoster,

    #[error("The incoming player is already in this roster")]
    IncomingAlreadyInRoster,

    #[error("No replacements remaining for this roster")]
    NoReplacementsLeft,
}

const MAX_ROSTER_NAME_LENGTH: usize = 60;

fn validate_roster_name(name: &str) -> Result<(), RosterError> {
    if name.trim().is_empty() {
        return Err(RosterError::EmptyTeamName);
    }

    if name.len() > MAX_ROSTER_NAME_LENGTH {
        return Err(RosterError::TeamNameTooLong(MAX_ROSTER_NAME_LENGTH));
    }

    Ok(())
}

fn validate_slots(slots: &[RosterSlot]) -> Result<(), RosterError> {
    if slots.len() != LINEUP_SIZE {
        return Err(RosterError::WrongSlotCount(LINEUP_SIZE));
    }

    for (i, slot) in slots.iter().enumerate() {
        if slots[..i].iter().any(|s| s.player_id == slot.player_id) {
            return Err(RosterError::DuplicatePlayer);
        }
    }

    Ok(())
}

/// Roster identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterId(String);

impl RosterId {
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

impl std::fmt::Display for RosterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for RosterId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// One selected player and whether the slot doubles its points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub player_id: PlayerId,
    pub vip: bool,
}

impl RosterSlot {
    pub fn new(player_id: PlayerId, vip: bool) -> Self {
        Self { player_id, vip }
    }
}

/// A participant's team for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    id: RosterId,
    event_id: EventId,
    participant_id: UserId,
    /// Denormalised for display without a user lookup
    participant_name: String,
    team_name: String,
    slots: Vec<RosterSlot>,
    replacements_left: u8,
    /// Points banked from before the current scoring data (carried over by
    /// administrators, e.g. across a data reset)
    archived_points: i64,
    /// Player id -> that player's total points at the moment they joined;
    /// replacement players are only credited for performance after joining
    join_history: HashMap<PlayerId, i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Roster {
    /// Commit a new roster. The slots must already have passed the lineup
    /// ruleset; this constructor only enforces structural invariants
    /// (count and uniqueness).
    pub fn new(
        event_id: EventId,
        participant_id: UserId,
        participant_name: impl Into<String>,
        team_name: impl Into<String>,
        slots: Vec<RosterSlot>,
        max_replacements: u8,
    ) -> Result<Self, RosterError> {
        let team_name = team_name.into();
        validate_roster_name(&team_name)?;
        validate_slots(&slots)?;
        let now = Utc::now();

        Ok(Self {
            id: RosterId::generate(),
            event_id,
            participant_id,
            participant_name: participant_name.into(),
            team_name,
            slots,
            replacements_left: max_replacements,
            archived_points: 0,
            join_history: HashMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &RosterId {
        &self.id
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn participant_id(&self) -> &UserId {
        &self.participant_id
    }

    pub fn participant_name(&self) -> &str {
        &self.participant_name
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    pub fn replacements_left(&self) -> u8 {
        self.replacements_left
    }

    pub fn archived_points(&self) -> i64 {
        self.archived_points
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Points the given player had already earned when joining this roster
    pub fn join_offset(&self, player_id: &PlayerId) -> i64 {
        self.join_history.get(player_id).copied().unwrap_or(0)
    }

    pub fn contains_player(&self, player_id: &PlayerId) -> bool {
        self.slots.iter().any(|slot| &slot.player_id == player_id)
    }

    // Mutators

    /// Full replace of name and slots (pre-deadline edit); the replacement
    /// budget, archived points and join history are untouched
    pub fn set_lineup(
        &mut self,
        team_name: impl Into<String>,
        slots: Vec<RosterSlot>,
    ) -> Result<(), RosterError> {
        let team_name = team_name.into();
        validate_roster_name(&team_name)?;
        validate_slots(&slots)?;
        self.team_name = team_name;
        self.slots = slots;
        self.touch();
        Ok(())
    }

    /// Apply an accepted replacement: swap the outgoing player for the
    /// incoming one (never VIP on arrival), record the incoming player's
    /// current total as their join offset, and spend one replacement.
    pub fn apply_swap(
        &mut self,
        outgoing: &PlayerId,
        incoming: PlayerId,
        points_at_joining: i64,
    ) -> Result<(), RosterError> {
        if self.replacements_left == 0 {
            return Err(RosterError::NoReplacementsLeft);
        }
        if self.contains_player(&incoming) {
            return Err(RosterError::IncomingAlreadyInRoster);
        }

        let slot = self
            .slots
            .iter_mut()
            .find(|slot| &slot.player_id == outgoing)
            .ok_or(RosterError::OutgoingNotInRoster)?;

        *slot = RosterSlot::new(incoming.clone(), false);
        self.join_history.insert(incoming, points_at_joining);
        self.replacements_left -= 1;
        self.touch();
        Ok(())
    }

    /// Administrator adjustment of banked points
    pub fn set_archived_points(&mut self, points: i64) {
        self.archived_points = points;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Roster {
    type Key = RosterId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eleven_slots() -> Vec<RosterSlot> {
        (0..11)
            .map(|i| RosterSlot::new(PlayerId::generate(), i == 0))
            .collect()
    }

    fn sample_roster() -> Roster {
        Roster::new(
            EventId::generate(),
            UserId::generate(),
            "Alice",
            "Alice's XI",
            eleven_slots(),
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_roster_creation() {
        let roster = sample_roster();

        assert_eq!(roster.team_name(), "Alice's XI");
        assert_eq!(roster.slots().len(), 11);
        assert_eq!(roster.replacements_left(), 3);
        assert_eq!(roster.archived_points(), 0);
    }

    #[test]
    fn test_roster_rejects_wrong_slot_count() {
        let mut slots = eleven_slots();
        slots.pop();

        let result = Roster::new(
            EventId::generate(),
            UserId::generate(),
            "Alice",
            "Alice's XI",
            slots,
            3,
        );
        assert_eq!(result.unwrap_err(), RosterError::WrongSlotCount(11));
    }

    #[test]
    fn test_roster_rejects_duplicate_player() {
        let mut slots = eleven_slots();
        slots[10] = slots[0].clone();

        let result = Roster::new(
            EventId::generate(),
            UserId::generate(),
            "Alice",
            "Alice's XI",
            slots,
            3,
        );
        assert_eq!(result.unwrap_err(), RosterError::DuplicatePlayer);
    }

    #[test]
    fn test_roster_rejects_empty_team_name() {
        let result = Roster::new(
            EventId::generate(),
            UserId::generate(),
            "Alice",
            "",
            eleven_slots(),
            3,
        );
        assert_eq!(result.unwrap_err(), RosterError::EmptyTeamName);
    }

    #[test]
    fn test_join_offset_defaults_to_zero() {
        let roster = sample_roster();
        assert_eq!(roster.join_offset(&PlayerId::generate()), 0);
    }

    #[test]
    fn test_apply_swap() {
        let mut roster = sample_roster();
        let outgoing = roster.slots()[3].player_id.clone();
        let incoming = PlayerId::generate();

        roster.apply_swap(&outgoing, incoming.clone(), 120).unwrap();

        assert!(!roster.contains_player(&outgoing));
        assert!(roster.contains_player(&incoming));
        assert_eq!(roster.join_offset(&incoming), 120);
        assert_eq!(roster.replacements_left(), 2);
        // an incoming player never arrives as VIP
        let slot = roster
            .slots()
            .iter()
            .find(|s| s.player_id == incoming)
            .unwrap();
        assert!(!slot.vip);
    }

    #[test]
    fn test_apply_swap_outgoing_missing() {
        let mut roster = sample_roster();
        let result = roster.apply_swap(&PlayerId::generate(), PlayerId::generate(), 0);
        assert_eq!(result.unwrap_err(), RosterError::OutgoingNotInRoster);
    }

    #[test]
    fn test_apply_swap_incoming_already_present() {
        let mut roster = sample_roster();
        let outgoing = roster.slots()[0].player_id.clone();
        let incoming = roster.slots()[1].player_id.clone();

        let result = roster.apply_swap(&outgoing, incoming, 0);
        assert_eq!(result.unwrap_err(), RosterError::IncomingAlreadyInRoster);
    }

    #[test]
    fn test_apply_swap_exhausted_budget() {
        let mut roster = Roster::new(
            EventId::generate(),
            UserId::generate(),
            "Bob",
            "Bob's XI",
            eleven_slots(),
            1,
        )
        .unwrap();

        let outgoing = roster.slots()[0].player_id.clone();
        roster.apply_swap(&outgoing, PlayerId::generate(), 0).unwrap();
        assert_eq!(roster.replacements_left(), 0);

        let outgoing = roster.slots()[1].player_id.clone();
        let result = roster.apply_swap(&outgoing, PlayerId::generate(), 0);
        assert_eq!(result.unwrap_err(), RosterError::NoReplacementsLeft);
    }

    #[test]
    fn test_set_lineup_preserves_budget_and_history() {
        let mut roster = sample_roster();
        let outgoing = roster.slots()[0].player_id.clone();
        let incoming = PlayerId::generate();
        roster.apply_swap(&outgoing, incoming.clone(), 50).unwrap();

        roster.set_lineup("Renamed XI", eleven_slots()).unwrap();

        assert_eq!(roster.team_name(), "Renamed XI");
        assert_eq!(roster.replacements_left(), 2);
        assert_eq!(roster.join_offset(&incoming), 50);
    }
}
