//! Routes called by the browser dashboard.
//!
//! The dashboard issues every call as a JSON `POST`, with job ids carried
//! in the body. These paths are mounted at the root, next to the static
//! assets, and share handlers with the `/api/v1` tree.

use axum::routing::post;
use axum::Router;

use crate::handlers::{jobs, workers};
use crate::state::AppState;

/// ```text
/// POST /workerList        -> list_workers
/// POST /jobList           -> list_jobs
/// POST /job               -> get_job_by_ref      {"jobID": "..."}
/// POST /newTask           -> submit_job          job document
/// POST /deleteJob         -> delete_job_by_ref   {"jobID": "..."}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workerList", post(workers::list_workers))
        .route("/jobList", post(jobs::list_jobs))
        .route("/job", post(jobs::get_job_by_ref))
        .route("/newTask", post(jobs::submit_job))
        .route("/deleteJob", post(jobs::delete_job_by_ref))
}
