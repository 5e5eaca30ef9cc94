//! Calendar-time policy.
//!
//! ## Summary
//! Every date the events engine sees is a naive wall-clock value in a single
//! configured calendar timezone. Stored instants are converted into that zone
//! exactly once, here, and all later arithmetic works on calendar components.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Resolves an IANA timezone name.
///
/// ## Errors
/// Returns `CoreError::ConfigError` for names unknown to the tz database.
pub fn parse_timezone(name: &str) -> CoreResult<Tz> {
    name.parse::<Tz>()
        .map_err(|err| CoreError::ConfigError(format!("unknown timezone {name:?}: {err}")))
}

/// ## Summary
/// Parses a stored date value into a calendar date-time in `tz`.
///
/// Accepts, in order:
/// - RFC 3339 instants (`2025-01-06T15:00:00.000Z`), converted to the wall clock of `tz`
/// - naive date-times (`2025-01-06T10:00:00`), taken as already local
/// - plain dates (`2025-01-06`), taken as local midnight
///
/// ## Errors
/// Returns `CoreError::ParseError` if the value matches none of these forms.
pub fn parse_calendar_datetime(value: &str, tz: Tz) -> CoreResult<NaiveDateTime> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&tz).naive_local());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(CoreError::ParseError(format!(
        "unrecognized date value {value:?}"
    )))
}

/// ## Summary
/// Parses a stored date value into a calendar date in `tz`.
///
/// ## Errors
/// Returns `CoreError::ParseError` under the same conditions as
/// [`parse_calendar_datetime`].
pub fn parse_calendar_date(value: &str, tz: Tz) -> CoreResult<NaiveDate> {
    parse_calendar_datetime(value, tz).map(|dt| dt.date())
}

/// ## Summary
/// Returns the current wall-clock time in `tz`.
///
/// Only the service edge should call this; the engine takes `now` as a parameter.
#[must_use]
pub fn calendar_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}
