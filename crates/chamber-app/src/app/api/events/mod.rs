//! Events page and newsletter digest endpoints.

mod digest;
mod listing;
mod view;

use chamber_core::error::CoreError;
use chamber_core::time::{calendar_now, parse_calendar_datetime};
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use salvo::writing::Json;
use salvo::{Request, Response, Router};

use crate::app::api::{DIGEST_ROUTE_COMPONENT, EVENTS_ROUTE_COMPONENT};
use crate::error::{AppError, AppResult};
use view::ErrorResponse;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(listing::listing_handler)
        .push(Router::with_path(DIGEST_ROUTE_COMPONENT).get(digest::digest_handler))
}

/// ## Summary
/// Reads the `now` query parameter, defaulting to the wall clock in `tz`.
///
/// ## Errors
/// Returns `CoreError::InvalidInput` if `now` is present but unparseable.
fn request_now(req: &Request, tz: Tz) -> AppResult<NaiveDateTime> {
    match req.query::<String>("now") {
        Some(value) => parse_calendar_datetime(&value, tz).map_err(|err| {
            tracing::debug!(value = %value, error = %err, "Rejected now parameter");
            CoreError::InvalidInput(format!("now parameter {value:?}")).into()
        }),
        None => Ok(calendar_now(tz)),
    }
}

/// Renders `err` as a JSON error body. Server faults are logged and not echoed.
fn render_app_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    let message = if status.is_server_error() {
        tracing::error!(error = ?err, "Events request failed");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    res.status_code(status);
    res.render(Json(ErrorResponse { error: message }));
}
