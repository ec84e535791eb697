//! Player validation

use thiserror::Error;

/// Errors that can occur during player validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlayerValidationError {
    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("Player name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Point values cannot be negative")]
    NegativePoints,
}

const MAX_PLAYER_NAME_LENGTH: usize = 80;

/// Validate a player display name
pub fn validate_player_name(name: &str) -> Result<(), PlayerValidationError> {
    if name.trim().is_empty() {
        return Err(PlayerValidationError::EmptyName);
    }

    if name.len() > MAX_PLAYER_NAME_LENGTH {
        return Err(PlayerValidationError::NameTooLong(MAX_PLAYER_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an administrator-supplied points sequence; unreported periods are
/// allowed (None) but reported values must be non-negative
pub fn validate_points(points: &[Option<i64>]) -> Result<(), PlayerValidationError> {
    if points.iter().flatten().any(|value| *value < 0) {
        return Err(PlayerValidationError::NegativePoints);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_player_name() {
        assert!(validate_player_name("MS Dhoni").is_ok());
    }

    #[test]
    fn test_empty_player_name() {
        assert_eq!(
            validate_player_name(""),
            Err(PlayerValidationError::EmptyName)
        );
    }

    #[test]
    fn test_player_name_too_long() {
        assert_eq!(
            validate_player_name(&"a".repeat(81)),
            Err(PlayerValidationError::NameTooLong(80))
        );
    }

    #[test]
    fn test_points_with_gaps_are_valid() {
        assert!(validate_points(&[Some(10), None, Some(0)]).is_ok());
    }

    #[test]
    fn test_negative_points_rejected() {
        assert_eq!(
            validate_points(&[Some(10), Some(-1)]),
            Err(PlayerValidationError::NegativePoints)
        );
    }
}
