//! Password validation functions

use super::ValidationError;

/// Validates that a password has at least `min` characters.
/// Length is counted in characters, not bytes.
pub fn check_min_length(password: &str, min: usize) -> Result<(), ValidationError> {
    if password.chars().count() >= min {
        Ok(())
    } else {
        Err(ValidationError::TooShort { min })
    }
}

/// True when both a primary and a confirmation password are present and differ
pub(crate) fn confirmation_differs(primary: Option<&str>, confirmation: Option<&str>) -> bool {
    match (primary, confirmation) {
        (Some(primary), Some(confirmation)) => primary != confirmation,
        _ => false,
    }
}
