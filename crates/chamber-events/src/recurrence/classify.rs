//! Past / this-week / upcoming bucketing.
//!
//! ## Summary
//! A pure partition of whatever occurrences it is given. It does not filter:
//! keeping recurring instances out of `past` is done by the caller when it
//! chooses the expansion window (see [`crate::listing`]).

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::model::EventOccurrence;

/// Length of the "this week" bucket, starting at `now`.
pub const THIS_WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// `occurrence < now`
    Past,
    /// `now <= occurrence < now + 7 days`
    ThisWeek,
    /// `occurrence >= now + 7 days`
    Upcoming,
}

impl Bucket {
    #[must_use]
    pub fn of(occurrence_date: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self::with_week_end(occurrence_date, now, week_end(now))
    }

    fn with_week_end(
        occurrence_date: NaiveDateTime,
        now: NaiveDateTime,
        week_end: Option<NaiveDateTime>,
    ) -> Self {
        if occurrence_date < now {
            return Self::Past;
        }
        match week_end {
            Some(week_end) if occurrence_date >= week_end => Self::Upcoming,
            _ => Self::ThisWeek,
        }
    }
}

/// `None` when `now + 7 days` is past the end of the calendar.
fn week_end(now: NaiveDateTime) -> Option<NaiveDateTime> {
    now.checked_add_signed(TimeDelta::days(THIS_WEEK_DAYS))
}

/// Occurrences split by [`Bucket`], each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition<'a> {
    pub past: Vec<EventOccurrence<'a>>,
    pub this_week: Vec<EventOccurrence<'a>>,
    pub upcoming: Vec<EventOccurrence<'a>>,
}

impl Partition<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.past.len() + self.this_week.len() + self.upcoming.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// ## Summary
/// Partitions `occurrences` into past, this-week and upcoming relative to `now`.
#[must_use]
pub fn classify<'a>(
    occurrences: impl IntoIterator<Item = EventOccurrence<'a>>,
    now: NaiveDateTime,
) -> Partition<'a> {
    let week_end = week_end(now);
    let mut partition = Partition::default();

    for occurrence in occurrences {
        let bucket = match Bucket::with_week_end(occurrence.occurrence_date, now, week_end) {
            Bucket::Past => &mut partition.past,
            Bucket::ThisWeek => &mut partition.this_week,
            Bucket::Upcoming => &mut partition.upcoming,
        };
        bucket.push(occurrence);
    }

    tracing::debug!(
        past = partition.past.len(),
        this_week = partition.this_week.len(),
        upcoming = partition.upcoming.len(),
        now = %now,
        "Classified occurrences"
    );

    partition
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::Event;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid test datetime")
    }

    #[test]
    fn test_bucket_boundaries() {
        let now = at(10, 12);

        assert_eq!(Bucket::of(at(10, 11), now), Bucket::Past);
        assert_eq!(Bucket::of(now, now), Bucket::ThisWeek);
        assert_eq!(Bucket::of(at(17, 11), now), Bucket::ThisWeek);
        assert_eq!(Bucket::of(at(17, 12), now), Bucket::Upcoming);
        assert_eq!(Bucket::of(at(30, 0), now), Bucket::Upcoming);
    }

    #[test]
    fn test_classify_keeps_input_order_per_bucket() {
        let events = [
            Event::new("p", "Past", at(3, 9)),
            Event::new("w1", "Soon", at(11, 9)),
            Event::new("u", "Later", at(25, 9)),
            Event::new("w2", "Sooner listed later", at(10, 13)),
        ];
        let occurrences = events.iter().map(EventOccurrence::single);

        let partition = classify(occurrences, at(10, 12));

        let ids = |list: &[EventOccurrence<'_>]| {
            list.iter().map(|o| o.event.id.as_str().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&partition.past), vec!["p"]);
        assert_eq!(ids(&partition.this_week), vec!["w1", "w2"]);
        assert_eq!(ids(&partition.upcoming), vec!["u"]);
        assert_eq!(partition.len(), 4);
    }

    #[test]
    fn test_classify_empty() {
        let partition = classify(Vec::new(), at(10, 12));
        assert!(partition.is_empty());
    }

    #[test]
    fn test_week_end_at_calendar_limit() {
        let now = NaiveDateTime::MAX;
        assert_eq!(Bucket::of(now, now), Bucket::ThisWeek);
    }
}
