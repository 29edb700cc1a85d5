//! URL construction for the upstream REST endpoints.
//!
//! Every URL is the configured base URL with fixed path segments appended.
//! Job ids are appended as a single percent-encoded segment, so `/`, `%`,
//! `?`, `#` and spaces inside an id can never change the shape of the path.

use tesdash_core::job_id::JobId;
use url::Url;

use crate::config::GatewayConfig;

const WORKERS: [&str; 3] = ["v1", "funnel", "workers"];
const TASKS: [&str; 2] = ["v1", "tasks"];

/// Builds upstream request URLs from an immutable base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            base: config.base_url().clone(),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET {base}/v1/funnel/workers`
    pub fn workers(&self) -> Url {
        self.join(&WORKERS)
    }

    /// `GET|POST {base}/v1/tasks`
    pub fn tasks(&self) -> Url {
        self.join(&TASKS)
    }

    /// `GET|DELETE {base}/v1/tasks/{job_id}`
    pub fn task(&self, job_id: &JobId) -> Url {
        let mut url = self.tasks();
        if let Ok(mut path) = url.path_segments_mut() {
            path.push(job_id.as_str());
        }
        url
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // An http(s) base always has a hierarchical path (GatewayConfig::new).
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
