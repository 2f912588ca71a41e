//! HTTP error type and mappings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scribed_core::SettingsError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients as structured JSON.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The worker could not be launched.
    #[error("Worker unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<SettingsError> for HttpError {
    fn from(err: SettingsError) -> Self {
        Self::Internal(err.to_string())
    }
}
