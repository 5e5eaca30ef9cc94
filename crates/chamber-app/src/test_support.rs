use std::sync::Arc;

use chamber_events::Event;
use salvo::{Router, Service};

use crate::app::api::routes;
use crate::config::{
    CalendarConfig, ConfigHandler, LoggingConfig, ServerConfig, Settings, StoreConfig,
};
use crate::store::{EventStoreHandler, MemoryEventStore};

pub const BASE_URL: &str = "http://127.0.0.1:5800";

#[must_use]
pub fn settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        calendar: CalendarConfig {
            timezone: "UTC".to_string(),
            listing_horizon_days: 90,
            past_lookback_days: 90,
            digest_days: 14,
            iteration_cap: 600,
        },
        store: StoreConfig {
            path: "events.json".to_string(),
        },
    }
}

/// A service wired the way `main` wires it, over an in-memory store.
#[must_use]
pub fn service(events: Vec<Event>) -> Service {
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: settings(),
        })
        .hoop(EventStoreHandler {
            store: Arc::new(MemoryEventStore::from_events(events)),
        })
        .push(routes());
    Service::new(router)
}
