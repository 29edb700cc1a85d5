use url::Url;

/// Environment variable holding the upstream base URL.
pub const BASE_URL_ENV: &str = "UPSTREAM_BASE_URL";

/// Older deployments configured the upstream as `funnelURL`; still honoured
/// when [`BASE_URL_ENV`] is unset.
pub const LEGACY_BASE_URL_ENV: &str = "FUNNEL_URL";

/// Gateway configuration: the root URL of the upstream service.
///
/// Built once at startup and never mutated afterwards. Construction
/// validates the URL so every later path join is infallible.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    base_url: Url,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GatewayConfig {
    /// Validate and wrap an upstream base URL, e.g. `http://funnel:8000`.
    ///
    /// The URL must be absolute `http`/`https` and must not carry a query
    /// string or fragment. A path prefix (`http://host/funnel`) is allowed.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let raw = base_url.trim();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not contain a query or fragment".into()));
        }

        Ok(Self { base_url: url })
    }

    /// Load configuration from the process environment.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `UPSTREAM_BASE_URL` | yes      | --      |
    /// | `FUNNEL_URL`        | no       | --      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = [BASE_URL_ENV, LEGACY_BASE_URL_ENV]
            .into_iter()
            .filter_map(|key| lookup(key))
            .find(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(BASE_URL_ENV))?;
        Self::new(&raw)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
