pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod workers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workers                 list workers (GET)
///
/// /jobs                    list (GET), submit (POST)
/// /jobs/{id}               get (GET), cancel (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workers", workers::router())
        .nest("/jobs", jobs::router())
}
