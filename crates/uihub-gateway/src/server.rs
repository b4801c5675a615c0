// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the plugin API.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{any, get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uihub_core::HubError;
use uihub_plugin::PluginRegistry;

use crate::handlers;

/// Default bound on handling one request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state for axum request handlers.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// The registry every plugin route delegates to.
    pub registry: Arc<PluginRegistry>,
    /// Requests still running after this long get `408 Request Timeout`.
    pub request_timeout: Duration,
}

impl GatewayState {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Listener settings (mirrors `[server]` from uihub-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, with IPv6 hosts bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Build the application router.
///
/// Routes:
/// - any method on /health and everything below it
/// - GET /api/v1/plugins
/// - POST /api/v1/plugins/enable
/// - GET, DELETE /api/v1/plugins/{name}
pub fn build_router(state: GatewayState) -> Router {
    let request_timeout = state.request_timeout;
    let api_routes = Router::new()
        .route("/plugins", get(handlers::list_plugins))
        .route("/plugins/enable", post(handlers::enable_plugin))
        .route(
            "/plugins/{name}",
            get(handlers::get_plugin).delete(handlers::delete_plugin),
        )
        .with_state(state);

    Router::new()
        .route("/health", any(handlers::health))
        .route("/health/{*rest}", any(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind `host:port` and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), HubError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| HubError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    serve(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), HubError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(
            %addr,
            backend = state.registry.backend(),
            timeout_secs = state.request_timeout.as_secs(),
            "gateway listening"
        );
    }

    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| HubError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}
