//! Occurrence expansion.
//!
//! ## Summary
//! Expands event records into concrete occurrences within a caller-supplied
//! window. Expansion is pure: the same events and window always produce the
//! same occurrences in the same order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::calendar::YearMonth;
use super::eligibility::is_eligible;
use super::rule::{MonthlyRule, RecurrenceRule, Series};
use crate::error::{EventsError, EventsResult, ValidationError};
use crate::model::{Event, EventId, EventOccurrence};

/// Candidate weeks or months examined per series before expansion gives up.
pub const DEFAULT_ITERATION_CAP: u32 = 600;

/// Inclusive `[start, end]` range within which occurrences are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpansionWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl ExpansionWindow {
    /// ## Summary
    /// Creates a window covering `start..=end`.
    ///
    /// ## Errors
    /// Returns `EventsError::InvalidWindow` if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EventsResult<Self> {
        if start > end {
            return Err(EventsError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// ## Summary
    /// Creates a window covering whole calendar days, from midnight on `first`
    /// through the last instant of `last`.
    ///
    /// ## Errors
    /// Returns `EventsError::InvalidWindow` if `first` is after `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> EventsResult<Self> {
        let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or(EventsError::WindowOutOfRange)?;
        Self::new(first.and_time(NaiveTime::MIN), last.and_time(end_of_day))
    }

    /// ## Summary
    /// Creates a window from `start` through `start + days`.
    ///
    /// ## Errors
    /// Returns `EventsError::WindowOutOfRange` if the end is not representable.
    pub fn starting_at(start: NaiveDateTime, days: u32) -> EventsResult<Self> {
        let end = start
            .checked_add_signed(TimeDelta::days(i64::from(days)))
            .ok_or(EventsError::WindowOutOfRange)?;
        Self::new(start, end)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Candidate periods (weeks or months) examined per series.
    pub iteration_cap: u32,
    /// Drop ineligible events inside the expander as well as before it.
    pub recheck_eligibility: bool,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            iteration_cap: DEFAULT_ITERATION_CAP,
            recheck_eligibility: false,
        }
    }
}

impl ExpansionOptions {
    #[must_use]
    pub const fn with_iteration_cap(mut self, iteration_cap: u32) -> Self {
        self.iteration_cap = iteration_cap;
        self
    }

    #[must_use]
    pub const fn with_eligibility_recheck(mut self) -> Self {
        self.recheck_eligibility = true;
        self
    }
}

/// Data problems met during expansion. None of them abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionAnomaly {
    /// The event was skipped entirely.
    #[error("event {event_id} skipped: {error}")]
    InvalidRecurrence {
        event_id: EventId,
        error: ValidationError,
    },

    /// Expansion stopped after `cap` candidate periods; later instances are missing.
    #[error("event {event_id} truncated after {cap} candidate periods")]
    IterationCapReached { event_id: EventId, cap: u32 },
}

impl ExpansionAnomaly {
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        match self {
            Self::InvalidRecurrence { event_id, .. }
            | Self::IterationCapReached { event_id, .. } => event_id,
        }
    }
}

/// Result of one expansion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion<'a> {
    /// Sorted by occurrence date; ties keep input event order.
    pub occurrences: Vec<EventOccurrence<'a>>,
    pub anomalies: Vec<ExpansionAnomaly>,
}

/// ## Summary
/// Expands `events` into occurrences within `window` using default options.
#[must_use]
pub fn expand<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    window: ExpansionWindow,
) -> Expansion<'a> {
    expand_with_options(events, window, ExpansionOptions::default())
}

/// ## Summary
/// Expands `events` into occurrences within `window`.
///
/// A non-recurring event yields its anchor if the window contains it. A
/// recurring event yields one instance per rule candidate within both the
/// window and its own `[anchor, until]` bounds. Events that fail validation
/// are skipped and reported as anomalies, as are series cut short by the
/// iteration cap.
#[must_use]
pub fn expand_with_options<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    window: ExpansionWindow,
    options: ExpansionOptions,
) -> Expansion<'a> {
    let mut expansion = Expansion::default();
    let mut event_count = 0_usize;

    for event in events {
        event_count += 1;

        if options.recheck_eligibility && !is_eligible(event) {
            tracing::trace!(
                event_id = %event.id,
                status = %event.event_status,
                "Skipping ineligible event"
            );
            continue;
        }

        match Series::from_event(event) {
            Ok(None) => {
                if window.contains(event.date) {
                    expansion.occurrences.push(EventOccurrence::single(event));
                }
            }
            Ok(Some(series)) => {
                if let Err(anomaly) = expand_series(
                    event,
                    &series,
                    window,
                    options.iteration_cap,
                    &mut expansion.occurrences,
                ) {
                    tracing::warn!(
                        event_id = %event.id,
                        cap = options.iteration_cap,
                        "Series expansion hit the iteration cap"
                    );
                    expansion.anomalies.push(anomaly);
                }
            }
            Err(error) => {
                tracing::warn!(
                    event_id = %event.id,
                    error = %error,
                    "Skipping event with invalid recurrence"
                );
                expansion.anomalies.push(ExpansionAnomaly::InvalidRecurrence {
                    event_id: event.id.clone(),
                    error,
                });
            }
        }
    }

    // Stable: ties keep the order events were given in.
    expansion
        .occurrences
        .sort_by_key(|occurrence| occurrence.occurrence_date);

    tracing::debug!(
        events = event_count,
        occurrences = expansion.occurrences.len(),
        anomalies = expansion.anomalies.len(),
        window_start = %window.start,
        window_end = %window.end,
        "Expanded events"
    );

    expansion
}

/// Pushes every instance of `series` inside `window`.
///
/// Returns an anomaly if candidates remained after `cap` periods.
fn expand_series<'a>(
    event: &'a Event,
    series: &Series,
    window: ExpansionWindow,
    cap: u32,
    out: &mut Vec<EventOccurrence<'a>>,
) -> Result<(), ExpansionAnomaly> {
    let lower = series.anchor.max(window.start);
    let last_date = series.until.min(window.end.date());
    if lower > window.end || lower.date() > last_date {
        return Ok(());
    }

    let bounds = Bounds {
        lower,
        upper: window.end,
        last_date,
    };

    let completed = match series.rule {
        RecurrenceRule::Weekly => weekly(event, series, &bounds, cap, out),
        RecurrenceRule::Monthly(rule) => monthly(event, series, rule, &bounds, cap, out),
    };

    if completed {
        Ok(())
    } else {
        Err(ExpansionAnomaly::IterationCapReached {
            event_id: event.id.clone(),
            cap,
        })
    }
}

/// Clipped range an instance must fall in.
struct Bounds {
    lower: NaiveDateTime,
    upper: NaiveDateTime,
    last_date: NaiveDate,
}

impl Bounds {
    fn admits(&self, candidate: NaiveDateTime) -> bool {
        candidate >= self.lower && candidate <= self.upper && candidate.date() <= self.last_date
    }

    /// True once no later candidate can be admitted.
    fn passed(&self, candidate: NaiveDateTime) -> bool {
        candidate > self.upper || candidate.date() > self.last_date
    }
}

/// Returns false if the cap stopped expansion early.
fn weekly<'a>(
    event: &'a Event,
    series: &Series,
    bounds: &Bounds,
    cap: u32,
    out: &mut Vec<EventOccurrence<'a>>,
) -> bool {
    // Whole weeks between the anchor and the lower bound never produce an
    // instance, so start from the last week at or before it.
    let mut week = (bounds.lower - series.anchor).num_weeks();
    let mut examined = 0_u32;

    loop {
        let Some(candidate) = series
            .anchor
            .checked_add_signed(TimeDelta::weeks(week))
        else {
            return true;
        };
        if bounds.passed(candidate) {
            return true;
        }
        if examined >= cap {
            return false;
        }
        examined += 1;

        if bounds.admits(candidate) {
            tracing::trace!(event_id = %event.id, occurrence = %candidate, "Weekly instance");
            out.push(EventOccurrence::instance(event, candidate));
        }
        week += 1;
    }
}

/// Returns false if the cap stopped expansion early.
fn monthly<'a>(
    event: &'a Event,
    series: &Series,
    rule: MonthlyRule,
    bounds: &Bounds,
    cap: u32,
    out: &mut Vec<EventOccurrence<'a>>,
) -> bool {
    let time = series.anchor.time();
    let last_month = YearMonth::of(bounds.last_date);
    let mut month = YearMonth::of(bounds.lower.date());
    let mut examined = 0_u32;

    while month <= last_month {
        let day = match rule {
            MonthlyRule::DayOfMonth { day } => month.day_clamped(day),
            MonthlyRule::DayOfWeek {
                week_index,
                weekday,
            } => month.nth_weekday(weekday, week_index),
        };

        match day.map(|day| day.and_time(time)) {
            Some(candidate) if bounds.passed(candidate) => return true,
            Some(candidate) if bounds.admits(candidate) => {
                // Only months that would yield an instance count against the cap.
                if examined >= cap {
                    return false;
                }
                examined += 1;
                tracing::trace!(
                    event_id = %event.id,
                    occurrence = %candidate,
                    "Monthly instance"
                );
                out.push(EventOccurrence::instance(event, candidate));
            }
            Some(_) => {}
            None => {
                tracing::trace!(
                    event_id = %event.id,
                    year = month.year(),
                    month = month.month(),
                    "No matching day this month"
                );
            }
        }

        month = month.succ();
    }

    true
}
