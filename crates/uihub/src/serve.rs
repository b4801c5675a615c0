// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `uihub serve` implementation.
//!
//! Builds the catalog and store from configuration, wires the registry into
//! the gateway, and serves until SIGINT or SIGTERM.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use uihub_config::model::{StoreBackend, StoreConfig, UiHubConfig};
use uihub_core::{HubError, ResourceStore};
use uihub_gateway::{GatewayState, ServerConfig};
use uihub_plugin::{PluginCatalog, PluginRegistry};
use uihub_store::{KubeStore, KubeStoreConfig, MemoryStore, in_cluster_api_url};

use crate::shutdown::install_signal_handler;

/// Run the plugin registry server.
pub async fn run_serve(config: UiHubConfig) -> Result<(), HubError> {
    init_tracing(&config.server.log_level);

    let catalog = build_catalog(&config)?;
    let store = build_store(&config.store)?;
    tracing::info!(
        plugins = catalog.len(),
        backend = store.backend(),
        "starting observability ui hub"
    );

    let registry = PluginRegistry::new(catalog, store);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let shutdown = install_signal_handler();
    let state = GatewayState::new(registry)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs));
    uihub_gateway::start_server(&server_config, state, shutdown).await
}

/// The configured catalog, or the built-in one when none is configured.
pub fn build_catalog(config: &UiHubConfig) -> Result<PluginCatalog, HubError> {
    if config.catalog.is_empty() {
        Ok(PluginCatalog::builtin())
    } else {
        PluginCatalog::new(config.catalog.clone())
    }
}

/// Construct the resource store selected by `[store]`.
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn ResourceStore>, HubError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, plugin state is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Kubernetes => {
            let api_url = config
                .api_url
                .clone()
                .or_else(in_cluster_api_url)
                .ok_or_else(|| {
                    HubError::Config(
                        "store.api_url is not set and KUBERNETES_SERVICE_HOST is not defined"
                            .to_string(),
                    )
                })?;
            let kube_config = KubeStoreConfig::from_files(
                api_url,
                Path::new(&config.token_file),
                Path::new(&config.ca_file),
                Duration::from_secs(config.request_timeout_secs),
            )?;
            tracing::debug!(config = ?kube_config, "connecting to kubernetes api");
            Ok(Arc::new(KubeStore::new(&kube_config)?))
        }
    }
}

/// Initialize the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uihub={log_level},tower_http={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
