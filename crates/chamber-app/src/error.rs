use chamber_core::error::CoreError;
use salvo::http::StatusCode;
use thiserror::Error;

/// Application-level errors (HTTP layer and startup)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    EventsError(#[from] chamber_events::EventsError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Failed to read event store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse event store: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AppError {
    /// ## Summary
    /// HTTP status for this error when it ends a request.
    ///
    /// Window errors and rejected request input are the client's; anything
    /// else is a server fault.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EventsError(_) | Self::CoreError(CoreError::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::CoreError(_) | Self::IoError(_) | Self::JsonError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
