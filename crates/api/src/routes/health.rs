use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Configured upstream base URL.
    pub upstream_url: String,
    /// Whether the upstream answered a worker listing with a 2xx status.
    pub upstream_healthy: bool,
}

/// GET /health -- returns service and upstream health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_healthy = match state.funnel.list_workers().await {
        Ok(relayed) => relayed.is_success(),
        Err(e) => {
            tracing::warn!(error = %e, "Upstream health probe failed");
            false
        }
    };

    let status = if upstream_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        upstream_url: state.funnel.base_url().to_string(),
        upstream_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
