//! Players available for selection, with roles and per-period scoring

pub mod entity;
pub mod validation;

pub use entity::{Nationality, Player, PlayerCategory, PlayerId};
pub use validation::{validate_player_name, validate_points, PlayerValidationError};
