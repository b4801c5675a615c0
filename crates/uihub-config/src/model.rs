// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the UI hub.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use uihub_core::CatalogEntry;

/// Top-level UI hub configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UiHubConfig {
    /// HTTP listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Resource store connection settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Plugin catalog override. Empty means the built-in catalog.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on handling one HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9002
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which resource store implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// The cluster's Kubernetes API server.
    #[default]
    Kubernetes,
    /// A process-local map; state is lost on restart.
    Memory,
}

/// Resource store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Store implementation.
    #[serde(default)]
    pub backend: StoreBackend,

    /// API server URL. `None` derives it from `KUBERNETES_SERVICE_HOST`
    /// and `KUBERNETES_SERVICE_PORT`.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Path to the bearer token file.
    #[serde(default = "default_token_file")]
    pub token_file: String,

    /// Path to the cluster CA bundle.
    #[serde(default = "default_ca_file")]
    pub ca_file: String,

    /// Timeout applied to each store request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            api_url: None,
            token_file: default_token_file(),
            ca_file: default_ca_file(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_token_file() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/token".to_string()
}

fn default_ca_file() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}
