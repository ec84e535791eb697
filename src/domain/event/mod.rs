//! Tournament events and their roster-building rule parameters

pub mod entity;
pub mod validation;

pub use entity::{Event, EventId, EventPhase, LeagueType};
pub use validation::{validate_event_name, validate_event_window, EventValidationError};
