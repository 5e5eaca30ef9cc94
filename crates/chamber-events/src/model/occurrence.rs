use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::Event;

/// One concrete calendar instance of an event.
///
/// Computed on demand and never stored. The anchor's time-of-day is carried
/// over unchanged; only the date moves between instances of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOccurrence<'a> {
    pub event: &'a Event,
    pub occurrence_date: NaiveDateTime,
    /// False only for the single occurrence of a non-recurring event.
    pub is_recurring_instance: bool,
}

impl<'a> EventOccurrence<'a> {
    #[must_use]
    pub const fn single(event: &'a Event) -> Self {
        Self {
            event,
            occurrence_date: event.date,
            is_recurring_instance: false,
        }
    }

    #[must_use]
    pub const fn instance(event: &'a Event, occurrence_date: NaiveDateTime) -> Self {
        Self {
            event,
            occurrence_date,
            is_recurring_instance: true,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.occurrence_date.date()
    }

    #[must_use]
    pub fn start_time(&self) -> Option<&'a str> {
        self.event.start_time.as_deref()
    }

    #[must_use]
    pub fn end_time(&self) -> Option<&'a str> {
        self.event.end_time.as_deref()
    }
}
