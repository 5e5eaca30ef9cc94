use std::sync::Arc;

use chamber_events::listing::{ListingOptions, build_listing};
use chrono::TimeDelta;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, handler};

use super::view::{AnomalyView, ListingResponse, views};
use super::{render_app_error, request_now};
use crate::config::{Settings, get_config_from_depot};
use crate::error::AppResult;
use crate::store::{EventSource, get_store_from_depot};

fn build_response(
    req: &Request,
    settings: &Settings,
    store: &Arc<dyn EventSource>,
) -> AppResult<ListingResponse> {
    let tz = settings.calendar.tz()?;
    let now = request_now(req, tz)?;

    let options = ListingOptions::from(&settings.calendar);
    let from = now
        .checked_sub_signed(TimeDelta::days(i64::from(options.past_lookback_days)))
        .unwrap_or(now);
    let to = now
        .checked_add_signed(TimeDelta::days(i64::from(options.horizon_days)))
        .unwrap_or(now);
    let events = store.candidate_events(from.date(), to.date());

    let listing = build_listing(&events, now, options)?;

    Ok(ListingResponse {
        now: listing.now,
        past: views(&listing.partition.past),
        this_week: views(&listing.partition.this_week),
        upcoming: views(&listing.partition.upcoming),
        anomalies: listing.anomalies.iter().map(AnomalyView::from).collect(),
    })
}

/// ## Summary
/// GET /api/events - Past, this-week and upcoming occurrences around `now`.
///
/// ## Errors
/// Returns HTTP 400 if `now` is invalid or too close to the calendar limits.
/// Returns HTTP 500 if configuration or the event store are unavailable.
#[handler]
pub async fn listing_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = get_config_from_depot(depot).and_then(|settings| {
        let store = get_store_from_depot(depot)?;
        build_response(req, &settings, &store)
    });

    match result {
        Ok(response) => res.render(Json(response)),
        Err(e) => render_app_error(res, &e),
    }
}
