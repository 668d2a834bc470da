//! Error types for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API error type that converts to HTTP responses.
///
/// Deliberately small: the engine degrades instead of failing, so the only
/// error a spin can surface is an internal precondition violation.
/// Malformed request bodies are rejected by axum's extractors before a
/// handler runs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<qreel_engine::EngineError> for ApiError {
    fn from(e: qreel_engine::EngineError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
