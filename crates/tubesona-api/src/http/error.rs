//! Application error type mapping to HTTP status codes.
//!
//! `NotFound` lookups surface as 404 with their detail; provider failures
//! surface as 500 with a generic message -- the upstream detail is logged
//! here, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use tubesona_types::error::LookupError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Channel lookup failure from the metadata provider.
    Lookup(LookupError),
    /// A resource addressed by the request does not exist.
    NotFound(String),
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        AppError::Lookup(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Lookup(LookupError::NotFound(reference)) => (
                StatusCode::NOT_FOUND,
                format!("Channel '{reference}' not found"),
            ),
            AppError::Lookup(LookupError::Provider(detail)) => {
                error!(detail = %detail, "channel lookup failed upstream");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Channel lookup failed".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        (status, axum::Json(json!({ "detail": message }))).into_response()
    }
}
