use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tesdash_core::error::CoreError;
use tesdash_funnel::api::FunnelApiError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for input validation and [`FunnelApiError`] for
/// upstream failures. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tesdash_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the upstream Funnel service.
    #[error(transparent)]
    Funnel(#[from] FunnelApiError),

    /// A request body that could not be read as the expected JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut upstream_status = None;

        let (status, code, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_INPUT", msg.clone())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

            AppError::Funnel(err) => match err {
                FunnelApiError::MalformedInput(CoreError::Validation(msg)) => {
                    (StatusCode::BAD_REQUEST, "MALFORMED_INPUT", msg.clone())
                }
                FunnelApiError::Transport(e) => {
                    tracing::error!(error = %e, "Upstream unreachable");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_UNAVAILABLE",
                        "The task service could not be reached".to_string(),
                    )
                }
                FunnelApiError::UpstreamHttp { status, .. } => {
                    upstream_status = Some(*status);
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        format!("The task service rejected the request with HTTP {status}"),
                    )
                }
            },

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(upstream_status) = upstream_status {
            body["upstream_status"] = json!(upstream_status);
        }

        (status, axum::Json(body)).into_response()
    }
}
