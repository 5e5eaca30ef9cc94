use crate::model::{Event, EventStatus};

/// ## Summary
/// Whether an event may be expanded and shown at all.
///
/// Only published events are eligible; pending, draft and cancelled events
/// never produce occurrences.
#[must_use]
pub fn is_eligible(event: &Event) -> bool {
    event.event_status == EventStatus::Published
}
