//! Display formatting helpers

use chrono::DateTime;

/// Render an ISO-8601 timestamp as a short date, e.g. "May 14, 2023".
///
/// The API delivers UTC timestamps; the offset in the input is kept as-is.
/// Anything that does not parse comes back unchanged so the display never
/// breaks on a bad field.
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
