//! Participant and administrator accounts

pub mod entity;
pub mod validation;

pub use entity::{User, UserId, UserRole};
pub use validation::{
    validate_email, validate_full_name, validate_password, UserValidationError,
};
