use axum::routing::get;
use axum::Router;

use crate::handlers::workers;
use crate::state::AppState;

/// Routes mounted at `/workers`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(workers::list_workers))
}
