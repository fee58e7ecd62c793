//! Timestamp parsing and formatting
//!
//! Inbound timestamps are ISO 8601 date-times. RFC 3339 strings keep their
//! offset; offset-less strings are read as local wall-clock time. All parsing
//! goes through fixed chrono patterns and never depends on the process locale.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

/// Fixed rendering pattern: `2024-01-02 03:04:05.678`
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Offset-less ISO 8601 patterns, tried in order after RFC 3339
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO 8601 date-time.
///
/// Returns `None` when the text matches none of the accepted patterns or names
/// a local time that does not exist (inside a DST gap).
///
/// # Examples
///
/// ```
/// use remote_console::core::timestamp::{format_display, parse_iso8601};
///
/// let timestamp = parse_iso8601("2024-01-02T03:04:05.678Z").unwrap();
/// assert_eq!(format_display(&timestamp), "2024-01-02 03:04:05.678");
/// ```
#[must_use]
pub fn parse_iso8601(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.fixed_offset())
}

/// Format a timestamp with [`DISPLAY_FORMAT`] in its own offset
#[must_use]
pub fn format_display(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}
