//! Event record storage.
//!
//! ## Summary
//! The engine only ever sees [`Event`] values with calendar dates already
//! resolved. Stored records carry loosely-typed ids and date strings; they are
//! converted here, once, in the configured calendar timezone.

use std::path::Path;
use std::sync::Arc;

use chamber_core::error::CoreError;
use chamber_core::time::{parse_calendar_date, parse_calendar_datetime};
use chamber_events::{Event, EventId, EventStatus, RecurrencePayload};
use chrono::NaiveDate;
use chrono_tz::Tz;
use salvo::async_trait;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Source of event records for expansion.
pub trait EventSource: Send + Sync {
    /// ## Summary
    /// Returns published events whose stored `date..=endDate` span overlaps
    /// `from..=to`.
    ///
    /// This is a coarse pre-filter. Expansion still applies the exact window.
    fn candidate_events(&self, from: NaiveDate, to: NaiveDate) -> Vec<Event>;
}

/// An event store held entirely in memory, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<Event>,
}

impl MemoryEventStore {
    #[must_use]
    pub const fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// ## Summary
    /// Parses a JSON array of stored event records.
    ///
    /// Records that fail to convert are skipped with a warning.
    ///
    /// ## Errors
    /// Returns `AppError::JsonError` if the document is not a JSON array.
    pub fn from_json(json: &str, tz: Tz) -> AppResult<Self> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let total = records.len();

        let events: Vec<Event> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match StoredEvent::convert(record, tz) {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::warn!(index, error = %err, "Skipping unreadable event record");
                    None
                }
            })
            .collect();

        tracing::debug!(total, loaded = events.len(), "Parsed event records");

        Ok(Self::from_events(events))
    }

    /// ## Summary
    /// Reads and parses the event store file at `path`.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or is not a JSON array.
    pub async fn load(path: impl AsRef<Path>, tz: Tz) -> AppResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json(&json, tz)?;

        tracing::info!(
            path = %path.display(),
            events = store.events.len(),
            "Event store loaded"
        );

        Ok(store)
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventSource for MemoryEventStore {
    fn candidate_events(&self, from: NaiveDate, to: NaiveDate) -> Vec<Event> {
        let candidates: Vec<Event> = self
            .events
            .iter()
            .filter(|event| event.event_status == EventStatus::Published)
            .filter(|event| {
                let first = event.date.date();
                let last = event.end_date.map_or(first, |end| end.max(first));
                first <= to && last >= from
            })
            .cloned()
            .collect();

        tracing::trace!(
            from = %from,
            to = %to,
            candidates = candidates.len(),
            "Selected candidate events"
        );

        candidates
    }
}

/// Stored ids are strings in newer exports and integers in older ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredId {
    Text(String),
    Number(i64),
}

impl From<StoredId> for EventId {
    fn from(id: StoredId) -> Self {
        match id {
            StoredId::Text(id) => Self::new(id),
            StoredId::Number(id) => Self::new(id.to_string()),
        }
    }
}

/// An event record as it appears in the store export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvent {
    id: StoredId,
    #[serde(default)]
    title: String,
    date: String,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    is_recurring: bool,
    #[serde(default)]
    recurrence: Option<RecurrencePayload>,
    /// Records without a status are never shown.
    #[serde(default = "pending")]
    event_status: EventStatus,
}

const fn pending() -> EventStatus {
    EventStatus::Pending
}

impl StoredEvent {
    fn convert(record: serde_json::Value, tz: Tz) -> AppResult<Event> {
        let stored: Self = serde_json::from_value(record)?;
        stored.into_event(tz)
    }

    fn into_event(self, tz: Tz) -> AppResult<Event> {
        let date = parse_calendar_datetime(&self.date, tz)?;
        let end_date = self
            .end_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_calendar_date(value, tz))
            .transpose()?;

        Ok(Event {
            id: self.id.into(),
            title: self.title,
            date,
            end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            is_recurring: self.is_recurring,
            recurrence: self.recurrence,
            event_status: self.event_status,
        })
    }
}

pub struct EventStoreHandler {
    pub store: Arc<dyn EventSource>,
}

#[async_trait]
impl salvo::Handler for EventStoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the event source from the depot.
///
/// ## Errors
/// Returns an error if no event source is found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn EventSource>> {
    depot
        .obtain::<Arc<dyn EventSource>>()
        .cloned()
        .map_err(|_err| {
            AppError::CoreError(CoreError::InvariantViolation(
                "Event store not found in depot",
            ))
        })
}
