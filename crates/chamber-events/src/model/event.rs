use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a stored event record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publishing workflow state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored `recurrenceType` value.
///
/// Unknown values deserialize to `Unsupported` so that one legacy record
/// cannot fail a whole batch; validation rejects it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceType {
    Weekly,
    Monthly,
    #[serde(other)]
    Unsupported,
}

/// Stored `monthlyType` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonthlyType {
    DayOfMonth,
    DayOfWeek,
    #[serde(other)]
    Unsupported,
}

/// The loosely-typed recurrence group as it is stored on an event.
///
/// Validated into a [`crate::recurrence::RecurrenceRule`] before use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrencePayload {
    pub recurrence_type: Option<RecurrenceType>,
    pub monthly_type: Option<MonthlyType>,
}

impl RecurrencePayload {
    #[must_use]
    pub const fn weekly() -> Self {
        Self {
            recurrence_type: Some(RecurrenceType::Weekly),
            monthly_type: None,
        }
    }

    #[must_use]
    pub const fn monthly(monthly_type: MonthlyType) -> Self {
        Self {
            recurrence_type: Some(RecurrenceType::Monthly),
            monthly_type: Some(monthly_type),
        }
    }
}

/// An event record, reduced to the fields the occurrence engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    /// Anchor: the sole occurrence, or the first occurrence of a series.
    pub date: NaiveDateTime,
    /// Last calendar date a series may produce an occurrence on.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence: Option<RecurrencePayload>,
    pub event_status: EventStatus,
}

impl Event {
    /// Creates a published, non-recurring event.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            id: EventId::new(id),
            title: title.into(),
            date,
            end_date: None,
            start_time: None,
            end_time: None,
            is_recurring: false,
            recurrence: None,
            event_status: EventStatus::Published,
        }
    }

    /// Turns the event into a series repeating per `recurrence` until `end_date`.
    #[must_use]
    pub fn recurring(mut self, recurrence: RecurrencePayload, end_date: NaiveDate) -> Self {
        self.is_recurring = true;
        self.recurrence = Some(recurrence);
        self.end_date = Some(end_date);
        self
    }

    /// Sets the free-form display times.
    #[must_use]
    pub fn with_times(
        mut self,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, event_status: EventStatus) -> Self {
        self.event_status = event_status;
        self
    }
}
