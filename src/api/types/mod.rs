//! Shared API types

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorDetail, ApiErrorKind, ApiErrorResponse};
pub use json::Json;
