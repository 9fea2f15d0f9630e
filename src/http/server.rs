//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all relay handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Bind server to listener
//! - Hand every inbound request to the forwarder

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::forwarder::Forwarder;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};

use crate::error::RelayError;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the signing relay.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The forwarder and its upstream client are built once and shared by
    /// every request.
    pub fn new(config: ProxyConfig) -> Result<Self, RelayError> {
        let forwarder = Arc::new(Forwarder::new(Arc::new(config.clone()))?);
        let state = AppState { forwarder };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main relay handler.
/// Every method on every path is forwarded, signed, to the upstream API.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Relaying request"
    );

    match state.forwarder.relay(request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                error = %error,
                "Relay failed"
            );
            error.into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
