//! HTTP error types
//!
//! Structured error responses for the ingestion surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::record::RecordError;
use crate::storage::StorageError;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not a usable reading
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The reading could not be turned into a canonical record
    #[error("bad request: {0}")]
    Record(#[from] RecordError),

    /// Persisting the reading failed
    #[error("failed to save data: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Record(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        tracing::warn!(
            error_message = %body.error,
            status = %status,
            "Request failed"
        );

        (status, Json(body)).into_response()
    }
}
