/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const EVENTS_ROUTE_COMPONENT: &str = "events";
pub const EVENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EVENTS_ROUTE_COMPONENT);

pub const DIGEST_ROUTE_COMPONENT: &str = "digest";
pub const DIGEST_ROUTE_PREFIX: &str =
    const_str::concat!(EVENTS_ROUTE_PREFIX, "/", DIGEST_ROUTE_COMPONENT);

/// Upper bound on a caller-supplied digest window, in days.
pub const MAX_DIGEST_DAYS: u32 = 366;
