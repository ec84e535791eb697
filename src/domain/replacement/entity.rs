//! Replacement request entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::player::PlayerId;
use crate::domain::roster::RosterId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Errors raised by replacement request state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReplacementError {
    #[error("Request has already been decided")]
    AlreadyDecided,
}

/// Replacement request identifier (UUID assigned at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementRequestId(String);

impl ReplacementRequestId {
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

impl std::fmt::Display for ReplacementRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ReplacementRequestId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Review status of a replacement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ReplacementStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ReplacementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A participant's proposal to swap one rostered player for another,
/// awaiting administrator review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementRequest {
    id: ReplacementRequestId,
    roster_id: RosterId,
    /// Denormalised for the admin review queue
    participant_name: String,
    outgoing_player_id: PlayerId,
    incoming_player_id: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    status: ReplacementStatus,
    /// Administrator's reason, set on rejection (optionally on acceptance)
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decided_at: Option<DateTime<Utc>>,
}

impl ReplacementRequest {
    pub fn new(
        roster_id: RosterId,
        participant_name: impl Into<String>,
        outgoing_player_id: PlayerId,
        incoming_player_id: PlayerId,
        note: Option<String>,
    ) -> Self {
        Self {
            id: ReplacementRequestId::generate(),
            roster_id,
            participant_name: participant_name.into(),
            outgoing_player_id,
            incoming_player_id,
            note,
            status: ReplacementStatus::Pending,
            reason: None,
            created_at: Utc::now(),
            decided_at: None,
        }
    }

    // Getters

    pub fn id(&self) -> &ReplacementRequestId {
        &self.id
    }

    pub fn roster_id(&self) -> &RosterId {
        &self.roster_id
    }

    pub fn participant_name(&self) -> &str {
        &self.participant_name
    }

    pub fn outgoing_player_id(&self) -> &PlayerId {
        &self.outgoing_player_id
    }

    pub fn incoming_player_id(&self) -> &PlayerId {
        &self.incoming_player_id
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn status(&self) -> ReplacementStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    // Transitions

    pub fn accept(&mut self, reason: Option<String>) -> Result<(), ReplacementError> {
        if !self.status.is_pending() {
            return Err(ReplacementError::AlreadyDecided);
        }
        self.status = ReplacementStatus::Accepted;
        self.reason = reason;
        self.decided_at = Some(Utc::now());
        Ok(())
    }

    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), ReplacementError> {
        if !self.status.is_pending() {
            return Err(ReplacementError::AlreadyDecided);
        }
        self.status = ReplacementStatus::Rejected;
        self.reason = Some(reason.into());
        self.decided_at = Some(Utc::now());
        Ok(())
    }
}

impl StorageEntity for ReplacementRequest {
    type Key = ReplacementRequestId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> ReplacementRequest {
        ReplacementRequest::new(
            RosterId::generate(),
            "Asha",
            PlayerId::generate(),
            PlayerId::generate(),
            Some("Injured in last match".to_string()),
        )
    }

    #[test]
    fn test_request_starts_pending() {
        let request = sample_request();

        assert!(request.status().is_pending());
        assert!(request.reason().is_none());
        assert!(request.decided_at().is_none());
    }

    #[test]
    fn test_accept() {
        let mut request = sample_request();
        request.accept(None).unwrap();

        assert_eq!(request.status(), ReplacementStatus::Accepted);
        assert!(request.decided_at().is_some());
    }

    #[test]
    fn test_reject_records_reason() {
        let mut request = sample_request();
        request.reject("Replacement window closed").unwrap();

        assert_eq!(request.status(), ReplacementStatus::Rejected);
        assert_eq!(request.reason(), Some("Replacement window closed"));
    }

    #[test]
    fn test_double_decision_rejected() {
        let mut request = sample_request();
        request.accept(None).unwrap();

        assert_eq!(
            request.reject("again").unwrap_err(),
            ReplacementError::AlreadyDecided
        );
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReplacementStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&ReplacementStatus::Accepted).unwrap(),
            "\"accepted\""
        );
    }
}
