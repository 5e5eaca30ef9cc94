//! Validated recurrence rules.
//!
//! ## Summary
//! The stored recurrence group is a pair of optional strings. Validation turns
//! it into a closed enum so that combinations like "monthly without a monthly
//! type" cannot reach the expander. The pattern itself (weekday, day of month,
//! week of month) is always read off the anchor date.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::error::ValidationError;
use crate::model::{Event, MonthlyType, RecurrenceType};

/// Which occurrence of a weekday within its month (1st to 5th).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekIndex(u8);

impl WeekIndex {
    pub const MAX: u8 = 5;

    /// `ceil(day / 7)`, capped at 5.
    #[must_use]
    pub fn from_day_of_month(day: u32) -> Self {
        let index = day.div_ceil(7).clamp(1, u32::from(Self::MAX));
        Self(u8::try_from(index).unwrap_or(Self::MAX))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthlyRule {
    /// Same day of month as the anchor; clamped to the month's last day.
    DayOfMonth { day: u32 },
    /// Same weekday and week-of-month as the anchor; months without one are skipped.
    DayOfWeek {
        week_index: WeekIndex,
        weekday: Weekday,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceRule {
    /// Every seven days on the anchor's weekday.
    Weekly,
    Monthly(MonthlyRule),
}

impl RecurrenceRule {
    /// ## Summary
    /// Derives the rule for a stored recurrence type pair and anchor.
    ///
    /// ## Errors
    /// Returns a `ValidationError` if the type pair is missing, unsupported, or
    /// inconsistent.
    pub fn derive(
        recurrence_type: Option<RecurrenceType>,
        monthly_type: Option<MonthlyType>,
        anchor: NaiveDate,
    ) -> Result<Self, ValidationError> {
        match recurrence_type {
            None => Err(ValidationError::MissingRecurrenceType),
            Some(RecurrenceType::Unsupported) => Err(ValidationError::UnsupportedRecurrenceType),
            Some(RecurrenceType::Weekly) => {
                if monthly_type.is_some() {
                    return Err(ValidationError::InconsistentRecurrence);
                }
                Ok(Self::Weekly)
            }
            Some(RecurrenceType::Monthly) => match monthly_type {
                None => Err(ValidationError::MissingMonthlyType),
                Some(MonthlyType::Unsupported) => Err(ValidationError::UnsupportedMonthlyType),
                Some(MonthlyType::DayOfMonth) => {
                    Ok(Self::Monthly(MonthlyRule::DayOfMonth { day: anchor.day() }))
                }
                Some(MonthlyType::DayOfWeek) => Ok(Self::Monthly(MonthlyRule::DayOfWeek {
                    week_index: WeekIndex::from_day_of_month(anchor.day()),
                    weekday: anchor.weekday(),
                })),
            },
        }
    }
}

/// A validated recurring event: its rule plus the bounds it lives within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Series {
    pub rule: RecurrenceRule,
    /// First occurrence; every later one keeps its time-of-day.
    pub anchor: NaiveDateTime,
    /// Last calendar date an occurrence may fall on.
    pub until: NaiveDate,
}

impl Series {
    /// ## Summary
    /// Validates an event's recurrence fields.
    ///
    /// Returns `Ok(None)` for a non-recurring event; a stale recurrence group
    /// on such an event is ignored.
    ///
    /// ## Errors
    /// Returns a `ValidationError` when a recurring event lacks a usable rule
    /// or a series end bound on or after its anchor date.
    pub fn from_event(event: &Event) -> Result<Option<Self>, ValidationError> {
        if !event.is_recurring {
            return Ok(None);
        }

        let payload = event.recurrence.unwrap_or_default();
        let anchor = event.date;
        let rule = RecurrenceRule::derive(
            payload.recurrence_type,
            payload.monthly_type,
            anchor.date(),
        )?;

        let until = match event.end_date {
            Some(end_date) if end_date >= anchor.date() => end_date,
            _ => return Err(ValidationError::InvalidSeriesBound),
        };

        Ok(Some(Self {
            rule,
            anchor,
            until,
        }))
    }
}

/// ## Summary
/// Validates an event and returns its recurrence rule, or `None` for a
/// non-recurring event.
///
/// ## Errors
/// See [`Series::from_event`].
pub fn validate(event: &Event) -> Result<Option<RecurrenceRule>, ValidationError> {
    Series::from_event(event).map(|series| series.map(|series| series.rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecurrencePayload;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(18, 30, 0))
            .expect("valid test datetime")
    }

    fn until(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn test_week_index_from_day() {
        let cases = [
            (1, 1),
            (7, 1),
            (8, 2),
            (14, 2),
            (15, 3),
            (21, 3),
            (22, 4),
            (28, 4),
            (29, 5),
            (31, 5),
        ];
        for (day, expected) in cases {
            assert_eq!(
                WeekIndex::from_day_of_month(day).get(),
                expected,
                "day {day}"
            );
        }
    }

    #[test]
    fn test_non_recurring_has_no_rule() {
        let event = Event::new("a", "Mixer", at(2025, 1, 6));
        assert_eq!(validate(&event), Ok(None));
    }

    #[test]
    fn test_stale_payload_on_non_recurring_is_ignored() {
        let mut event = Event::new("a", "Mixer", at(2025, 1, 6));
        event.recurrence = Some(RecurrencePayload::default());
        assert_eq!(validate(&event), Ok(None));
    }

    #[test]
    fn test_weekly() {
        let event = Event::new("a", "Mixer", at(2025, 1, 6))
            .recurring(RecurrencePayload::weekly(), until(2025, 2, 3));
        assert_eq!(validate(&event), Ok(Some(RecurrenceRule::Weekly)));
    }

    #[test]
    fn test_monthly_day_of_month_reads_anchor_day() {
        let event = Event::new("a", "Board", at(2025, 1, 31))
            .recurring(RecurrencePayload::monthly(MonthlyType::DayOfMonth), until(2025, 4, 30));
        assert_eq!(
            validate(&event),
            Ok(Some(RecurrenceRule::Monthly(MonthlyRule::DayOfMonth { day: 31 })))
        );
    }

    #[test]
    fn test_monthly_day_of_week_reads_anchor_position() {
        let event = Event::new("a", "Lunch", at(2025, 1, 14))
            .recurring(RecurrencePayload::monthly(MonthlyType::DayOfWeek), until(2025, 3, 31));
        assert_eq!(
            validate(&event),
            Ok(Some(RecurrenceRule::Monthly(MonthlyRule::DayOfWeek {
                week_index: WeekIndex::from_day_of_month(8),
                weekday: Weekday::Tue,
            })))
        );
    }

    #[test]
    fn test_missing_recurrence_type() {
        let mut event = Event::new("a", "Mixer", at(2025, 1, 6));
        event.is_recurring = true;
        event.end_date = Some(until(2025, 2, 1));
        assert_eq!(validate(&event), Err(ValidationError::MissingRecurrenceType));

        event.recurrence = Some(RecurrencePayload::default());
        assert_eq!(validate(&event), Err(ValidationError::MissingRecurrenceType));
    }

    #[test]
    fn test_missing_monthly_type() {
        let payload = RecurrencePayload {
            recurrence_type: Some(RecurrenceType::Monthly),
            monthly_type: None,
        };
        let event = Event::new("a", "Mixer", at(2025, 1, 6)).recurring(payload, until(2025, 6, 1));
        assert_eq!(validate(&event), Err(ValidationError::MissingMonthlyType));
    }

    #[test]
    fn test_weekly_with_monthly_type_is_inconsistent() {
        let payload = RecurrencePayload {
            recurrence_type: Some(RecurrenceType::Weekly),
            monthly_type: Some(MonthlyType::DayOfWeek),
        };
        let event = Event::new("a", "Mixer", at(2025, 1, 6)).recurring(payload, until(2025, 6, 1));
        assert_eq!(validate(&event), Err(ValidationError::InconsistentRecurrence));
    }

    #[test]
    fn test_unsupported_types() {
        let daily = RecurrencePayload {
            recurrence_type: Some(RecurrenceType::Unsupported),
            monthly_type: None,
        };
        let event = Event::new("a", "Mixer", at(2025, 1, 6)).recurring(daily, until(2025, 6, 1));
        assert_eq!(validate(&event), Err(ValidationError::UnsupportedRecurrenceType));

        let odd_monthly = RecurrencePayload::monthly(MonthlyType::Unsupported);
        let event =
            Event::new("a", "Mixer", at(2025, 1, 6)).recurring(odd_monthly, until(2025, 6, 1));
        assert_eq!(validate(&event), Err(ValidationError::UnsupportedMonthlyType));
    }

    #[test]
    fn test_series_bound() {
        let mut event = Event::new("a", "Mixer", at(2025, 1, 6))
            .recurring(RecurrencePayload::weekly(), until(2025, 1, 5));
        assert_eq!(validate(&event), Err(ValidationError::InvalidSeriesBound));

        event.end_date = None;
        assert_eq!(validate(&event), Err(ValidationError::InvalidSeriesBound));

        // A series may end on its anchor date.
        event.end_date = Some(until(2025, 1, 6));
        assert_eq!(validate(&event), Ok(Some(RecurrenceRule::Weekly)));
    }

    #[test]
    fn test_series_carries_bounds() {
        let event = Event::new("a", "Mixer", at(2025, 1, 6))
            .recurring(RecurrencePayload::weekly(), until(2025, 2, 3));
        let series = Series::from_event(&event)
            .expect("valid series")
            .expect("recurring");
        assert_eq!(series.anchor, at(2025, 1, 6));
        assert_eq!(series.until, until(2025, 2, 3));
    }
}
