//! Recurrence rules, occurrence expansion and window classification.

pub mod calendar;
pub mod classify;
pub mod eligibility;
pub mod expand;
pub mod rule;

pub use classify::{Bucket, Partition, classify};
pub use eligibility::is_eligible;
pub use expand::{
    DEFAULT_ITERATION_CAP, Expansion, ExpansionAnomaly, ExpansionOptions, ExpansionWindow, expand,
    expand_with_options,
};
pub use rule::{MonthlyRule, RecurrenceRule, Series, WeekIndex, validate};
