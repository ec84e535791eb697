//! Event validation

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during event validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EventValidationError {
    #[error("Event name cannot be empty")]
    EmptyName,

    #[error("Event name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Registration deadline must be before the tournament end time")]
    DeadlineAfterEnd,

    #[error("Maximum VIP players cannot exceed the lineup size of {0}")]
    VipQuotaTooLarge(usize),
}

const MAX_EVENT_NAME_LENGTH: usize = 120;

/// Validate an event display name
pub fn validate_event_name(name: &str) -> Result<(), EventValidationError> {
    if name.trim().is_empty() {
        return Err(EventValidationError::EmptyName);
    }

    if name.len() > MAX_EVENT_NAME_LENGTH {
        return Err(EventValidationError::NameTooLong(MAX_EVENT_NAME_LENGTH));
    }

    Ok(())
}

/// Validate that the registration window closes before the tournament ends
pub fn validate_event_window(
    registration_deadline: DateTime<Utc>,
    tournament_end_time: DateTime<Utc>,
) -> Result<(), EventValidationError> {
    if registration_deadline >= tournament_end_time {
        return Err(EventValidationError::DeadlineAfterEnd);
    }

    Ok(())
}
