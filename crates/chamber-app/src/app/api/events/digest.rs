use std::sync::Arc;

use chamber_core::constants::MAX_DIGEST_DAYS;
use chamber_core::error::CoreError;
use chamber_events::listing::build_digest;
use chamber_events::recurrence::ExpansionOptions;
use chrono::TimeDelta;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, handler};

use super::view::{DigestResponse, views};
use super::{render_app_error, request_now};
use crate::config::{Settings, get_config_from_depot};
use crate::error::AppResult;
use crate::store::{EventSource, get_store_from_depot};

/// ## Summary
/// Reads the `days` query parameter, capped at [`MAX_DIGEST_DAYS`].
///
/// ## Errors
/// Returns `CoreError::InvalidInput` if `days` is not a non-negative integer.
fn request_days(req: &Request, default_days: u32) -> AppResult<u32> {
    match req.query::<String>("days") {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map(|days| days.min(MAX_DIGEST_DAYS))
            .map_err(|err| {
                tracing::debug!(value = %value, error = %err, "Rejected days parameter");
                CoreError::InvalidInput(format!("days parameter {value:?}")).into()
            }),
        None => Ok(default_days.min(MAX_DIGEST_DAYS)),
    }
}

fn build_response(
    req: &Request,
    settings: &Settings,
    store: &Arc<dyn EventSource>,
) -> AppResult<DigestResponse> {
    let tz = settings.calendar.tz()?;
    let now = request_now(req, tz)?;
    let days = request_days(req, settings.calendar.digest_days)?;

    let options = ExpansionOptions::default().with_iteration_cap(settings.calendar.iteration_cap);
    let window_end = now
        .checked_add_signed(TimeDelta::days(i64::from(days)))
        .unwrap_or(now);
    let events = store.candidate_events(now.date(), window_end.date());

    let digest = build_digest(&events, now, days, options)?;

    Ok(DigestResponse {
        now,
        window_end: digest.window.end(),
        occurrences: views(&digest.occurrences),
    })
}

/// ## Summary
/// GET /api/events/digest - Occurrences in the `days` following `now`.
///
/// ## Errors
/// Returns HTTP 400 if `now` or `days` is invalid.
/// Returns HTTP 500 if configuration or the event store are unavailable.
#[handler]
pub async fn digest_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = get_config_from_depot(depot).and_then(|settings| {
        let store = get_store_from_depot(depot)?;
        build_response(req, &settings, &store)
    });

    match result {
        Ok(response) => res.render(Json(response)),
        Err(e) => render_app_error(res, &e),
    }
}
