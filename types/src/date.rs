//! Lenient timestamp parsing on top of chrono.
//!
//! Formats use chrono's strftime syntax. Everything returns `Option`; a
//! string that does not parse is simply not a date.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

const ISO8601: &str = "%Y-%m-%dT%H:%M:%S%:z";
const RFC3339_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse with an arbitrary format.
///
/// Formats that carry an offset keep it. Formats without one are read as UTC,
/// and date-only formats resolve to midnight.
#[must_use]
pub fn parse_with_format(raw: &str, format: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
        return Some(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(raw, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// `2024-03-01T12:30:00+07:00`, with `Z` accepted for UTC.
#[must_use]
pub fn parse_iso8601(raw: &str) -> Option<DateTime<FixedOffset>> {
    let normalized = match raw.strip_suffix('Z') {
        Some(head) => Cow::Owned(format!("{head}+00:00")),
        None => Cow::Borrowed(raw),
    };
    DateTime::parse_from_str(&normalized, ISO8601).ok()
}

/// `2024-03-01T12:30:00.123Z`.
#[must_use]
pub fn parse_rfc3339_millis(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, RFC3339_MILLIS)
        .ok()
        .map(|naive| naive.and_utc())
}
