//! Liveness endpoint.

use axum::Json;

use crate::dto::StatusResponse;

/// GET / - API liveness check.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::online())
}
