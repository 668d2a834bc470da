//! Spin endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::dto::{SpinRequest, SpinResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /spin - Run one quantum slot spin.
///
/// Builds the 3-qubit circuit from the request parameters, executes it on
/// hardware or the simulator, draws one outcome from the shot distribution,
/// and maps it to reel symbols. Hardware trouble degrades to the simulator
/// rather than failing the request.
pub async fn spin(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpinRequest>,
) -> Result<Json<SpinResponse>, ApiError> {
    let outcome = state
        .engine
        .spin(request.theta, request.entanglement)
        .await?;

    Ok(Json(outcome.into()))
}
