//! Validated identifier for a job on the upstream service.
//!
//! Job ids are opaque strings minted by the upstream. The rules enforced
//! here only guarantee that an id addresses exactly one path segment: it
//! is never empty (no `/v1/tasks/`), never a dot segment (`.` and `..`
//! would be normalized away by URL resolution) and never carries control
//! characters, which URL parsers strip silently.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Opaque, non-empty job identifier.
///
/// # Examples
///
/// ```
/// use tesdash_core::job_id::JobId;
///
/// let id = JobId::parse("b8ct5rk2d0d3ebm7fqng").unwrap();
/// assert_eq!(id.as_str(), "b8ct5rk2d0d3ebm7fqng");
/// assert!(JobId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Validate a raw id. Empty, whitespace-only, `.`, `..` and ids containing
    /// control characters are rejected.
    ///
    /// The id is stored exactly as given (no trimming): the upstream owns
    /// the id format and the gateway must not rewrite it.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.trim().is_empty() {
            return Err(CoreError::Validation(
                "jobID must be a non-empty string".to_string(),
            ));
        }
        if raw == "." || raw == ".." {
            return Err(CoreError::Validation(format!(
                "jobID '{raw}' is not addressable"
            )));
        }
        if raw.chars().any(char::is_control) {
            return Err(CoreError::Validation(
                "jobID must not contain control characters".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Validate an id that may be absent (e.g. a missing JSON field).
    pub fn parse_opt(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Err(CoreError::Validation("jobID is required".to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
