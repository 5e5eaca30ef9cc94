use chamber_events::EventOccurrence;
use chamber_events::recurrence::ExpansionAnomaly;
use chrono::NaiveDateTime;
use serde::Serialize;

/// ## Summary
/// One occurrence as rendered to the site.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceView {
    pub id: String,
    pub title: String,
    pub occurrence_date: NaiveDateTime,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_recurring_instance: bool,
}

impl From<&EventOccurrence<'_>> for OccurrenceView {
    fn from(occurrence: &EventOccurrence<'_>) -> Self {
        Self {
            id: occurrence.event.id.to_string(),
            title: occurrence.event.title.clone(),
            occurrence_date: occurrence.occurrence_date,
            start_time: occurrence.start_time().map(str::to_string),
            end_time: occurrence.end_time().map(str::to_string),
            is_recurring_instance: occurrence.is_recurring_instance,
        }
    }
}

/// ## Summary
/// An event that was skipped or truncated during expansion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyView {
    pub event_id: String,
    pub message: String,
}

impl From<&ExpansionAnomaly> for AnomalyView {
    fn from(anomaly: &ExpansionAnomaly) -> Self {
        Self {
            event_id: anomaly.event_id().to_string(),
            message: anomaly.to_string(),
        }
    }
}

/// ## Summary
/// GET /api/events response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub now: NaiveDateTime,
    /// Most recent first.
    pub past: Vec<OccurrenceView>,
    pub this_week: Vec<OccurrenceView>,
    pub upcoming: Vec<OccurrenceView>,
    pub anomalies: Vec<AnomalyView>,
}

/// ## Summary
/// GET /api/events/digest response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestResponse {
    pub now: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub occurrences: Vec<OccurrenceView>,
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[must_use]
pub fn views(occurrences: &[EventOccurrence<'_>]) -> Vec<OccurrenceView> {
    occurrences.iter().map(OccurrenceView::from).collect()
}
