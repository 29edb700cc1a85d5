//! Handlers for the worker registry.

use axum::extract::State;

use crate::error::AppResult;
use crate::response::Relay;
use crate::state::AppState;

/// GET /api/v1/workers, POST /workerList
///
/// Relay the upstream worker list (`{ "workers": [...] }`).
pub async fn list_workers(State(state): State<AppState>) -> AppResult<Relay> {
    let relayed = state.funnel.list_workers().await?;
    Ok(Relay(relayed))
}
