//! A real HTTP server standing in for the upstream Funnel service.
//!
//! Records every request it receives and answers through a caller-supplied
//! responder, so tests can assert on exactly what the gateway sent.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use futures::StreamExt;
use tesdash_funnel::api::FunnelApi;
use tesdash_funnel::config::GatewayConfig;

/// One request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Raw (still percent-encoded) request path.
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> Response + Send + Sync>;

#[derive(Clone)]
struct FakeState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
}

pub struct FakeUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    /// Bind to an ephemeral port and serve `responder` for every request.
    pub async fn start(
        responder: impl Fn(&RecordedRequest) -> Response + Send + Sync + 'static,
    ) -> Self {
        Self::start_at("", responder).await
    }

    /// Like [`start`](Self::start) but advertises `prefix` as part of the
    /// base URL (e.g. `/funnel`).
    pub async fn start_at(
        prefix: &str,
        responder: impl Fn(&RecordedRequest) -> Response + Send + Sync + 'static,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}{prefix}"),
            requests,
        }
    }

    /// Serve the same status and JSON body for every request.
    pub async fn json(status: StatusCode, body: &'static str) -> Self {
        Self::start(move |_| json_response(status, body)).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn api(&self) -> FunnelApi {
        api_for(&self.base_url)
    }
}

async fn record(State(state): State<FakeState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let recorded = RecordedRequest {
        method: parts.method,
        path: parts.uri.path().to_string(),
        content_type: parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: body.to_vec(),
    };

    let response = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);
    response
}

pub fn json_response(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Stream `chunks` as separate body frames with a short pause between each.
pub fn chunked_response(chunks: Vec<Vec<u8>>) -> Response {
    let stream = futures::stream::iter(chunks).then(|chunk| async move {
        tokio::time::sleep(Duration::from_millis(2)).await;
        Ok::<_, std::io::Error>(chunk)
    });
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(stream),
    )
        .into_response()
}

/// Gateway client for `base_url`, ignoring any proxy set in the test
/// environment.
pub fn api_for(base_url: &str) -> FunnelApi {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    FunnelApi::with_client(client, &GatewayConfig::new(base_url).unwrap())
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Error-level events emitted by the gateway, keyed by their `op` field.
#[derive(Clone, Default)]
pub struct ErrorEvents(Arc<Mutex<Vec<Option<String>>>>);

impl ErrorEvents {
    /// Route this thread's events into a fresh recorder until the guard drops.
    pub fn capture() -> (Self, tracing::subscriber::DefaultGuard) {
        use tracing_subscriber::layer::SubscriberExt;

        let events = Self::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        (events, tracing::subscriber::set_default(subscriber))
    }

    pub fn ops(&self) -> Vec<Option<String>> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorEvents {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        if *metadata.level() != tracing::Level::ERROR
            || !metadata.target().starts_with("tesdash_funnel")
        {
            return;
        }
        let mut op = OpField(None);
        event.record(&mut op);
        self.0.lock().unwrap().push(op.0);
    }
}

struct OpField(Option<String>);

impl tracing::field::Visit for OpField {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "op" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {}
}
