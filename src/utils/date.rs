//! Timestamp parsing for catalog values and command-line input.

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Timelike};
use tracing::debug;

/// Catalog layout with fractional seconds and a numeric offset.
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Naive layout with optional fractional seconds.
const FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Date-only layout (midnight UTC).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp into a timezone-naive UTC instant.
///
/// Accepted forms:
/// - `2011-09-27T22:04:46` (taken as UTC)
/// - `2011-09-27T22:04:46.000`
/// - `2011-09-27T22:04:46.000+0000`, `...+00:00`, `...Z`
/// - `2011-09-27` (midnight UTC)
///
/// A numeric offset is applied to yield UTC. Sub-second precision is
/// truncated to whole seconds since the catalog does not store it.
///
/// # Errors
/// Returns [`Error::InvalidTimestamp`] if no form matches.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, OFFSET_FORMAT))
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, FRACTION_FORMAT))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT))
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| Error::InvalidTimestamp {
            value: value.to_string(),
        })?;

    if parsed.nanosecond() != 0 {
        debug!(
            "Dropping sub-second precision from '{}' ({} ns)",
            trimmed,
            parsed.nanosecond()
        );
    }

    Ok(parsed.trunc_subsecs(0))
}

/// Format a timestamp the way the catalog does, without offset.
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
