use chrono::NaiveDateTime;
use thiserror::Error;

/// Reasons a stored event cannot be turned into a recurrence rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("recurring event has no recurrence type")]
    MissingRecurrenceType,

    #[error("monthly recurrence has no monthly type")]
    MissingMonthlyType,

    #[error("recurring event needs an end date on or after its start date")]
    InvalidSeriesBound,

    #[error("unsupported recurrence type")]
    UnsupportedRecurrenceType,

    #[error("unsupported monthly type")]
    UnsupportedMonthlyType,

    #[error("weekly recurrence must not carry a monthly type")]
    InconsistentRecurrence,
}

/// Events engine errors
#[derive(Error, Debug)]
pub enum EventsError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Window falls outside the supported calendar range")]
    WindowOutOfRange,
}

pub type EventsResult<T> = std::result::Result<T, EventsError>;
