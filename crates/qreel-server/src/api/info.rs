//! Info endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::dto::InfoResponse;
use crate::state::AppState;

/// GET /info - Describe the circuit, symbols, and backend configuration.
///
/// Read-only: the queue probe behind `hardware.pending_jobs` is best effort
/// and never changes connection state.
pub async fn info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    let snapshot = state.engine.info().await;
    Json(InfoResponse::from_engine(snapshot))
}
