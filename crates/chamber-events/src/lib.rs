//! Recurring-event occurrence engine.
//!
//! ## Summary
//! Turns stored event records into concrete, ordered calendar occurrences and
//! buckets them for listing pages and newsletter digests. Everything here is a
//! pure function of its arguments: callers supply `now` and the expansion window.

pub mod error;
pub mod listing;
pub mod model;
pub mod recurrence;

pub use error::{EventsError, EventsResult, ValidationError};
pub use model::{
    Event, EventId, EventOccurrence, EventStatus, MonthlyType, RecurrencePayload, RecurrenceType,
};
