//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;

use solis_proxy::config::ProxyConfig;
use solis_proxy::HttpServer;

/// One request as observed by the mock upstream.
#[derive(Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Canned reply the mock upstream returns for every request.
#[derive(Clone, Copy)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: &'static str,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
    reply: CannedResponse,
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockUpstream {
    /// Requests received so far.
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock upstream that records every request and returns a fixed
/// response.
pub async fn start_mock_upstream(reply: CannedResponse) -> MockUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        requests: requests.clone(),
        reply,
    };

    let app = Router::new()
        .route("/{*path}", any(record_handler))
        .route("/", any(record_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, requests }
}

async fn record_handler(
    State(state): State<MockState>,
    request: Request<Body>,
) -> Response<Body> {
    let method = request.method().to_string();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap();

    state.requests.lock().unwrap().push(ReceivedRequest {
        method,
        path_and_query,
        headers: parts.headers,
        body: body.to_vec(),
    });

    let mut response = Response::new(Body::from(state.reply.body));
    *response.status_mut() = StatusCode::from_u16(state.reply.status).unwrap();
    if let Some(content_type) = state.reply.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type.parse().unwrap());
    }
    response
}

/// Build a relay config pointing at the given upstream address, with a
/// fixture credential.
pub fn proxy_config(upstream_addr: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.base_url = format!("http://{upstream_addr}");
    config.upstream.app_id = "test-app-id".into();
    config.upstream.app_secret = "test-app-secret".into();
    config
}

/// Start the relay on an ephemeral port and return its address.
pub async fn start_proxy(config: ProxyConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    addr
}
