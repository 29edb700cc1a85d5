//! Handlers for upstream jobs.
//!
//! Two request shapes reach the same gateway operations: REST-style paths
//! under `/api/v1/jobs`, and the dashboard's POST routes that carry the job
//! id in a `{"jobID": "..."}` body.

use axum::extract::{Path, State};
use serde::Deserialize;
use tesdash_core::job_id::JobId;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::Relay;
use crate::state::AppState;

/// Body of the dashboard's `/job` and `/deleteJob` requests.
#[derive(Debug, Default, Deserialize)]
pub struct JobRef {
    #[serde(rename = "jobID")]
    pub job_id: Option<String>,
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs, POST /jobList
///
/// Relay the upstream job list (`{ "jobs": [...] }`).
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<Relay> {
    let relayed = state.funnel.list_jobs().await?;
    Ok(Relay(relayed))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Relay> {
    let job_id = JobId::parse(&job_id)?;
    fetch_job(&state, &job_id).await
}

/// POST /job
pub async fn get_job_by_ref(
    State(state): State<AppState>,
    AppJson(body): AppJson<JobRef>,
) -> AppResult<Relay> {
    let job_id = JobId::parse_opt(body.job_id.as_deref())?;
    fetch_job(&state, &job_id).await
}

async fn fetch_job(state: &AppState, job_id: &JobId) -> AppResult<Relay> {
    let relayed = state.funnel.get_job(job_id).await?;
    Ok(Relay(relayed))
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs, POST /newTask
///
/// Forward the job document untouched. The upstream is the only validator
/// of its contents.
pub async fn submit_job(
    State(state): State<AppState>,
    AppJson(doc): AppJson<serde_json::Value>,
) -> AppResult<Relay> {
    let relayed = state.funnel.submit_job(&doc).await?;
    Ok(Relay(relayed))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/jobs/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Relay> {
    let job_id = JobId::parse(&job_id)?;
    cancel_job(&state, &job_id).await
}

/// POST /deleteJob
pub async fn delete_job_by_ref(
    State(state): State<AppState>,
    AppJson(body): AppJson<JobRef>,
) -> AppResult<Relay> {
    let job_id = JobId::parse_opt(body.job_id.as_deref())?;
    cancel_job(&state, &job_id).await
}

async fn cancel_job(state: &AppState, job_id: &JobId) -> AppResult<Relay> {
    let relayed = state.funnel.delete_job(job_id).await?;
    tracing::info!(job_id = %job_id, "Job cancelled");
    Ok(Relay(relayed))
}
