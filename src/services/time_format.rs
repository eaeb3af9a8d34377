//! Humanized rendering of show start times.
//!
//! Two display forms are supported:
//! - [`DateFormat::Full`]: `Tuesday May, 21, 2019 at 9:30PM`
//! - [`DateFormat::Medium`]: `Tue 05, 21, 2019 9:30PM` (the default)
//!
//! Both keep minute precision, so a rendered value parses back to the same
//! instant with [`parse_formatted`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

const FULL_PATTERN: &str = "%A %B, %-d, %Y at %-I:%M%p";
const MEDIUM_PATTERN: &str = "%a %m, %d, %Y %-I:%M%p";

/// Accepted machine formats, tried in order after RFC 3339.
const INPUT_PATTERNS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    Full,
    #[default]
    Medium,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::Full => FULL_PATTERN,
            Self::Medium => MEDIUM_PATTERN,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised timestamp `{0}`")]
pub struct TimestampParseError(pub String);

/// Parse an ISO-8601-like timestamp into a wall-clock date-time.
///
/// Offsets are honoured by keeping the local wall-clock reading. A bare date
/// means midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampParseError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for pattern in INPUT_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimestampParseError(value.to_string()))
}

pub fn format_timestamp(value: &NaiveDateTime, format: DateFormat) -> String {
    value.format(format.pattern()).to_string()
}

/// Parse `value` as a timestamp and render it in `format`.
pub fn format_datetime(value: &str, format: DateFormat) -> Result<String, TimestampParseError> {
    parse_timestamp(value).map(|dt| format_timestamp(&dt, format))
}

/// Inverse of [`format_timestamp`].
pub fn parse_formatted(
    value: &str,
    format: DateFormat,
) -> Result<NaiveDateTime, TimestampParseError> {
    NaiveDateTime::parse_from_str(value, format.pattern())
        .map_err(|_| TimestampParseError(value.to_string()))
}
