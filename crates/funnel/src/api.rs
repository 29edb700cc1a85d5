//! REST API client for the Funnel task-execution service.
//!
//! Wraps the five job/worker endpoints using [`reqwest`]. Each operation
//! issues exactly one HTTP request: no retries, no gateway-level timeout.
//! Job and worker documents are relayed as opaque bytes.

use serde::Serialize;
use tesdash_core::error::CoreError;
use tesdash_core::job_id::JobId;
use url::Url;

use crate::config::GatewayConfig;
use crate::endpoints::Endpoints;
use crate::relay::{read_body, RelayedBody};

/// `User-Agent` sent on every upstream request.
const USER_AGENT: &str = concat!("tesdash/", env!("CARGO_PKG_VERSION"));

/// HTTP client for a single upstream Funnel server.
#[derive(Debug, Clone)]
pub struct FunnelApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

/// Errors from the Funnel REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum FunnelApiError {
    /// The HTTP request itself failed (connection refused, DNS, TLS, or the
    /// body stream broke off).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered a write with a non-2xx status code.
    #[error("Funnel API error ({status}): {body}")]
    UpstreamHttp {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The caller's input cannot address a job. No request was issued.
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] CoreError),
}

/// Coarse classification of a [`FunnelApiError`], for callers that only
/// need to branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayErrorKind {
    Transport,
    UpstreamHttp,
    MalformedInput,
}

impl FunnelApiError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::Transport(_) => GatewayErrorKind::Transport,
            Self::UpstreamHttp { .. } => GatewayErrorKind::UpstreamHttp,
            Self::MalformedInput(_) => GatewayErrorKind::MalformedInput,
        }
    }
}

impl FunnelApi {
    /// Create a new API client for the configured upstream.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            endpoints: Endpoints::new(config),
        }
    }

    pub fn base_url(&self) -> &Url {
        self.endpoints.base()
    }

    // ---- reads ----

    /// List registered workers (`GET /v1/funnel/workers`).
    pub async fn list_workers(&self) -> Result<RelayedBody, FunnelApiError> {
        self.fetch(self.endpoints.workers()).await
    }

    /// List jobs (`GET /v1/tasks`).
    pub async fn list_jobs(&self) -> Result<RelayedBody, FunnelApiError> {
        self.fetch(self.endpoints.tasks()).await
    }

    /// Fetch one job (`GET /v1/tasks/{job_id}`).
    pub async fn get_job(&self, job_id: &JobId) -> Result<RelayedBody, FunnelApiError> {
        self.fetch(self.endpoints.task(job_id)).await
    }

    /// Like [`get_job`](Self::get_job), validating a raw id first. An empty
    /// id fails with [`FunnelApiError::MalformedInput`] without a request.
    pub async fn get_job_str(&self, job_id: &str) -> Result<RelayedBody, FunnelApiError> {
        let job_id = JobId::parse(job_id)?;
        self.get_job(&job_id).await
    }

    // ---- writes ----

    /// Submit a job document (`POST /v1/tasks`).
    ///
    /// The document is sent as-is with `Content-Type: application/json`;
    /// only the upstream validates it. Failures are logged and returned.
    pub async fn submit_job(&self, doc: &serde_json::Value) -> Result<RelayedBody, FunnelApiError> {
        let url = self.endpoints.tasks();
        tracing::debug!(%url, "Submitting job upstream");

        let request = self.client.post(url).json(doc);
        self.send_write("submit_job", None, request).await
    }

    /// Cancel and delete a job (`DELETE /v1/tasks/{job_id}`).
    ///
    /// Failures are logged and returned.
    pub async fn delete_job(&self, job_id: &JobId) -> Result<RelayedBody, FunnelApiError> {
        let url = self.endpoints.task(job_id);
        tracing::debug!(%url, job_id = %job_id, "Deleting job upstream");

        let request = self.client.delete(url);
        self.send_write("delete_job", Some(job_id), request).await
    }

    /// Like [`delete_job`](Self::delete_job), validating a raw id first.
    pub async fn delete_job_str(&self, job_id: &str) -> Result<RelayedBody, FunnelApiError> {
        let job_id = JobId::parse(job_id)?;
        self.delete_job(&job_id).await
    }

    // ---- private helpers ----

    /// Issue a GET and relay the complete body whatever the status code.
    async fn fetch(&self, url: Url) -> Result<RelayedBody, FunnelApiError> {
        tracing::debug!(%url, "Fetching from upstream");

        let response = self.client.get(url).send().await?;
        let relayed = read_body(response).await?;

        if !relayed.is_success() {
            tracing::warn!(status = relayed.status, "Upstream read returned non-success status");
        }
        Ok(relayed)
    }

    /// Send a write request, require a 2xx answer, and log the outcome.
    async fn send_write(
        &self,
        op: &'static str,
        job_id: Option<&JobId>,
        request: reqwest::RequestBuilder,
    ) -> Result<RelayedBody, FunnelApiError> {
        let result = Self::execute_write(request).await;

        let job_id = job_id.map(JobId::as_str);
        match &result {
            Ok(relayed) => {
                tracing::info!(op, job_id, status = relayed.status, "Upstream write succeeded");
            }
            Err(e) => {
                tracing::error!(op, job_id, error = %e, "Upstream write failed");
            }
        }
        result
    }

    async fn execute_write(request: reqwest::RequestBuilder) -> Result<RelayedBody, FunnelApiError> {
        let relayed = read_body(request.send().await?).await?;
        if !relayed.is_success() {
            return Err(FunnelApiError::UpstreamHttp {
                status: relayed.status,
                body: relayed.text().into_owned(),
            });
        }
        Ok(relayed)
    }
}
