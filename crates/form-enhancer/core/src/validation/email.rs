//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// One non-whitespace run, '@', one non-whitespace run, '.', one non-whitespace run.
// Deliberately looser than RFC 5322.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validates basic email format
///
/// Checks for:
/// - Exactly one '@' with content on both sides
/// - At least one '.' after the '@' with content on both sides
/// - No whitespace anywhere
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
