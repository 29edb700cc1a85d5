//! Buffered upstream response bodies.
//!
//! The upstream may stream a body in any number of chunks. [`read_body`]
//! accumulates every chunk until the stream ends, so callers only ever see
//! the complete payload.

use std::borrow::Cow;

use reqwest::header::CONTENT_TYPE;

/// Upper bound on the up-front buffer reservation taken from
/// `Content-Length`. Larger bodies still arrive intact; they just grow the
/// buffer as chunks come in.
const MAX_PREALLOC_BYTES: u64 = 1024 * 1024;

/// A complete upstream response, relayed without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedBody {
    /// HTTP status code returned by the upstream.
    pub status: u16,
    /// Upstream `Content-Type` header, if present and valid UTF-8.
    pub content_type: Option<String>,
    /// Body bytes, exactly as received.
    pub body: Vec<u8>,
}

impl RelayedBody {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Drain a response into a [`RelayedBody`], chunk by chunk.
pub(crate) async fn read_body(mut response: reqwest::Response) -> Result<RelayedBody, reqwest::Error> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let reserve = response.content_length().unwrap_or(0).min(MAX_PREALLOC_BYTES);
    let mut body = Vec::with_capacity(reserve as usize);
    let mut chunks = 0usize;
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        chunks += 1;
    }

    tracing::trace!(status, bytes = body.len(), chunks, "Upstream body received");

    Ok(RelayedBody {
        status,
        content_type,
        body,
    })
}
