//! Caller-side composition for the events page and the newsletter digest.
//!
//! ## Summary
//! Both surfaces run the same pipeline: drop ineligible events, expand the rest
//! over a window derived from `now`, then order (and for the page, bucket) the
//! occurrences.
//!
//! Recurring series are expanded only from `now` onwards, so their instances
//! never appear under "past". One-off events are expanded over a lookback as
//! well, which is how finished events reach the past list.

use chamber_core::config::CalendarConfig;
use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{EventsError, EventsResult};
use crate::model::{Event, EventOccurrence};
use crate::recurrence::{
    DEFAULT_ITERATION_CAP, ExpansionAnomaly, ExpansionOptions, ExpansionWindow, Partition,
    classify, expand_with_options, is_eligible,
};

pub const DEFAULT_HORIZON_DAYS: u32 = 90;
pub const DEFAULT_PAST_LOOKBACK_DAYS: u32 = 90;
pub const DEFAULT_DIGEST_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// How far ahead of `now` occurrences are materialized.
    pub horizon_days: u32,
    /// How far back of `now` one-off events are listed as past.
    pub past_lookback_days: u32,
    pub iteration_cap: u32,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            past_lookback_days: DEFAULT_PAST_LOOKBACK_DAYS,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }
}

impl From<&CalendarConfig> for ListingOptions {
    fn from(config: &CalendarConfig) -> Self {
        Self {
            horizon_days: config.listing_horizon_days,
            past_lookback_days: config.past_lookback_days,
            iteration_cap: config.iteration_cap,
        }
    }
}

impl ListingOptions {
    fn expansion(self) -> ExpansionOptions {
        ExpansionOptions::default().with_iteration_cap(self.iteration_cap)
    }
}

/// Events page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<'a> {
    pub now: NaiveDateTime,
    /// `past` is most recent first; the other buckets are chronological.
    pub partition: Partition<'a>,
    pub anomalies: Vec<ExpansionAnomaly>,
}

/// Newsletter "upcoming events" content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest<'a> {
    pub window: ExpansionWindow,
    pub occurrences: Vec<EventOccurrence<'a>>,
    pub anomalies: Vec<ExpansionAnomaly>,
}

/// ## Summary
/// Builds the events page listing for `now`.
///
/// ## Errors
/// Returns `EventsError::WindowOutOfRange` if the horizon or lookback falls
/// outside the representable calendar.
pub fn build_listing<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    options: ListingOptions,
) -> EventsResult<Listing<'a>> {
    let (series, one_off): (Vec<&Event>, Vec<&Event>) = events
        .iter()
        .filter(|event| is_eligible(event))
        .partition(|event| event.is_recurring);

    let ahead = ExpansionWindow::starting_at(now, options.horizon_days)?;
    let lookback_start = now
        .checked_sub_signed(TimeDelta::days(i64::from(options.past_lookback_days)))
        .ok_or(EventsError::WindowOutOfRange)?;
    let around = ExpansionWindow::new(lookback_start, ahead.end())?;

    let recurring = expand_with_options(series, ahead, options.expansion());
    let single = expand_with_options(one_off, around, options.expansion());

    let mut anomalies = recurring.anomalies;
    anomalies.extend(single.anomalies);

    let merged = merge_occurrences(recurring.occurrences, single.occurrences);
    let mut partition = classify(merged, now);
    partition.past.reverse();

    tracing::debug!(
        now = %now,
        total = partition.len(),
        anomalies = anomalies.len(),
        "Built events listing"
    );

    Ok(Listing {
        now,
        partition,
        anomalies,
    })
}

/// ## Summary
/// Builds the digest of occurrences in the `days` following `now`.
///
/// ## Errors
/// Returns `EventsError::WindowOutOfRange` if `now + days` is not representable.
pub fn build_digest<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    days: u32,
    options: ExpansionOptions,
) -> EventsResult<Digest<'a>> {
    let window = ExpansionWindow::starting_at(now, days)?;
    let expansion = expand_with_options(
        events.iter().filter(|event| is_eligible(event)),
        window,
        options,
    );

    tracing::debug!(
        now = %now,
        days,
        occurrences = expansion.occurrences.len(),
        "Built events digest"
    );

    Ok(Digest {
        window,
        occurrences: expansion.occurrences,
        anomalies: expansion.anomalies,
    })
}

/// ## Summary
/// Merges two date-ordered occurrence lists into one.
///
/// On equal dates, occurrences from `first` come before those from `second`,
/// and each list keeps its own order.
#[must_use]
pub fn merge_occurrences<'a>(
    first: Vec<EventOccurrence<'a>>,
    second: Vec<EventOccurrence<'a>>,
) -> Vec<EventOccurrence<'a>> {
    let mut merged = first;
    merged.extend(second);
    merged.sort_by_key(|occurrence| occurrence.occurrence_date);
    merged
}
