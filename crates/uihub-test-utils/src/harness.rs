// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` wires a catalog, a store and the HTTP router together the
//! same way the binary does. Requests can be driven in-process through
//! [`TestHarness::request`] or over a real socket via
//! [`TestHarness::spawn_server`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use uihub_core::{HubError, ResourceStore};
use uihub_gateway::{GatewayState, build_router};
use uihub_plugin::{PluginCatalog, PluginRegistry};
use uihub_store::MemoryStore;

/// Builder for creating test environments with configurable options.
#[derive(Default)]
pub struct TestHarnessBuilder {
    catalog: Option<PluginCatalog>,
    store: Option<Arc<dyn ResourceStore>>,
    seeded: Vec<(String, Value)>,
}

impl TestHarnessBuilder {
    /// Use a custom catalog instead of the built-in one.
    pub fn with_catalog(mut self, catalog: PluginCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use a custom store instead of a fresh [`MemoryStore`].
    pub fn with_store(mut self, store: Arc<dyn ResourceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Pre-load a raw document into the memory store.
    ///
    /// Ignored when a custom store is supplied.
    pub fn with_document(mut self, name: impl Into<String>, document: Value) -> Self {
        self.seeded.push((name.into(), document));
        self
    }

    pub fn build(self) -> TestHarness {
        let memory = Arc::new(MemoryStore::new());
        for (name, document) in self.seeded {
            memory.insert_raw(name, document);
        }

        let store = match self.store {
            Some(store) => store,
            None => memory.clone() as Arc<dyn ResourceStore>,
        };
        let registry = PluginRegistry::new(self.catalog.unwrap_or_default(), store);
        let state = GatewayState::new(registry);

        TestHarness {
            router: build_router(state.clone()),
            registry: state.registry,
            memory,
        }
    }
}

/// A fully wired registry and router.
pub struct TestHarness {
    pub registry: Arc<PluginRegistry>,
    /// The memory store; unused by the registry when a custom store was given.
    pub memory: Arc<MemoryStore>,
    router: Router,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Built-in catalog over an empty memory store.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Send one request through the router and collect the response body.
    pub async fn request(&self, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()));
        let request = match request {
            Ok(request) => request,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()),
        };

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        (status, body)
    }

    /// Serve the router on an ephemeral localhost port.
    pub async fn spawn_server(&self) -> Result<RunningServer, HubError> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| HubError::Internal(format!("failed to bind test listener: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| HubError::Internal(format!("failed to read local address: {e}")))?;

        let shutdown = CancellationToken::new();
        let state = GatewayState {
            registry: Arc::clone(&self.registry),
            request_timeout: uihub_gateway::server::DEFAULT_REQUEST_TIMEOUT,
        };
        let handle = tokio::spawn(uihub_gateway::serve(listener, state, shutdown.clone()));

        Ok(RunningServer {
            addr,
            shutdown,
            handle,
        })
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A gateway serving on a real socket.
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<Result<(), HubError>>,
}

impl RunningServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(self) -> Result<(), HubError> {
        self.shutdown.cancel();
        self.handle
            .await
            .map_err(|e| HubError::Internal(format!("server task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailingStore;
    use serde_json::json;

    #[tokio::test]
    async fn default_harness_lists_builtin_catalog() {
        let harness = TestHarness::new();
        let (status, body) = harness.request(Method::GET, "/api/v1/plugins", "").await;
        assert_eq!(status, StatusCode::OK);
        let views: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(views.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn seeded_documents_are_visible() {
        let harness = TestHarness::builder()
            .with_document(
                "dashboards-observability-ui-plugin",
                json!({
                    "apiVersion": "observability-ui.openshift.io/v1alpha1",
                    "kind": "ObservabilityUIPlugin",
                    "metadata": {"name": "dashboards-observability-ui-plugin"},
                    "spec": {"displayName": "Dashboards", "version": "dev", "type": "dashboards"}
                }),
            )
            .build();
        let (status, body) = harness
            .request(
                Method::GET,
                "/api/v1/plugins/dashboards-observability-ui-plugin",
                "",
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"isEnabled\":true"));
    }

    #[tokio::test]
    async fn failing_store_surfaces_as_500() {
        let harness = TestHarness::builder()
            .with_store(Arc::new(FailingStore::default()))
            .build();
        let (status, body) = harness.request(Method::GET, "/api/v1/plugins", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("connection refused"));
    }

    #[tokio::test]
    async fn spawned_server_stops_cleanly() {
        let harness = TestHarness::new();
        let server = harness.spawn_server().await.unwrap();
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        server.stop().await.unwrap();
    }
}
