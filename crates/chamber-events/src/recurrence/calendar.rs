//! Calendar-month arithmetic on naive dates.

use chrono::{Datelike, NaiveDate, Weekday};

use super::rule::WeekIndex;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The following month.
    #[must_use]
    pub const fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns `None` outside chrono's representable range.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    #[must_use]
    pub fn last_day(self) -> Option<NaiveDate> {
        self.succ().first_day()?.pred_opt()
    }

    /// `day` in this month, clamped to the month's last day when it overflows.
    #[must_use]
    pub fn day_clamped(self, day: u32) -> Option<NaiveDate> {
        let last = self.last_day()?;
        NaiveDate::from_ymd_opt(self.year, self.month, day.clamp(1, last.day()))
    }

    /// The `week_index`-th `weekday` of this month, if the month has one.
    #[must_use]
    pub fn nth_weekday(self, weekday: Weekday, week_index: WeekIndex) -> Option<NaiveDate> {
        NaiveDate::from_weekday_of_month_opt(self.year, self.month, weekday, week_index.get())
    }
}
