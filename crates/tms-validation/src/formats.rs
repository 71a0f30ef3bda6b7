//! Format validation for record string fields
//!
//! Pre-compiled regex validators for the string formats the record schemas
//! enforce: email addresses, calendar dates and 24-hour clock times.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// Email regex pattern (RFC 5322 simplified)
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$").unwrap()
});

/// Date regex pattern (YYYY-MM-DD)
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()
});

/// Clock time pattern (H:MM or HH:MM, 24-hour)
static CLOCK_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap()
});

// ============================================================================
// Format Validators
// ============================================================================

/// Validate email format
///
/// # Example
/// ```
/// use tms_validation::formats::validate_email;
///
/// assert!(validate_email("user@example.com"));
/// assert!(!validate_email("invalid-email"));
/// ```
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate date format (YYYY-MM-DD)
///
/// Only the shape is checked here; calendar validity is checked when the
/// value is parsed into a date.
pub fn validate_date(value: &str) -> bool {
    DATE_REGEX.is_match(value)
}

/// Validate a 24-hour clock time (`HH:MM`, leading zero on the hour optional)
///
/// # Example
/// ```
/// use tms_validation::formats::validate_clock_time;
///
/// assert!(validate_clock_time("09:30"));
/// assert!(validate_clock_time("9:30"));
/// assert!(!validate_clock_time("25:00"));
/// assert!(!validate_clock_time("9:3"));
/// ```
pub fn validate_clock_time(value: &str) -> bool {
    CLOCK_TIME_REGEX.is_match(value)
}
