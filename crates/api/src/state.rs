use std::sync::Arc;

use tesdash_funnel::api::FunnelApi;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the gateway is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the upstream Funnel service.
    pub funnel: Arc<FunnelApi>,
}
