mod event;
mod occurrence;

pub use event::{Event, EventId, EventStatus, MonthlyType, RecurrencePayload, RecurrenceType};
pub use occurrence::EventOccurrence;
