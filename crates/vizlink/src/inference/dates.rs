//! Date-likeness heuristics for string fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").unwrap(), // ISO 8601 date-time
        Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap(),              // YYYY-M-D
        Regex::new(r"^\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}$").unwrap(),  // D/M/YYYY and friends
    ]
});

const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];

/// Check if a string looks like a date.
pub fn is_date_string(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    if DATE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
        return true;
    }

    parses_as_date(trimmed)
}

/// Generic date parse over common textual formats.
fn parses_as_date(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok() {
        return true;
    }

    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}
