//! Relay of upstream responses back to the browser.
//!
//! Job and worker documents are never re-serialized: the upstream body is
//! written out byte for byte, under the upstream's own status code.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tesdash_funnel::relay::RelayedBody;

use crate::error::AppError;

/// Fallback `Content-Type` when the upstream sends none.
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// An upstream response passed through to the caller unchanged.
#[derive(Debug)]
pub struct Relay(pub RelayedBody);

impl IntoResponse for Relay {
    fn into_response(self) -> Response {
        let RelayedBody {
            status,
            content_type,
            body,
        } = self.0;

        let Ok(status) = StatusCode::from_u16(status) else {
            return AppError::InternalError(format!("upstream sent invalid status {status}"))
                .into_response();
        };

        let content_type = content_type
            .and_then(|v| HeaderValue::from_str(&v).ok())
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
    }
}
