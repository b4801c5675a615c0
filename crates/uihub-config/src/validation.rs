// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{StoreBackend, UiHubConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &UiHubConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` must be one of: {}",
                config.server.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (key, secs) in [
        ("server.request_timeout_secs", config.server.request_timeout_secs),
        ("store.request_timeout_secs", config.store.request_timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be greater than zero"),
            });
        }
    }

    if config.store.backend == StoreBackend::Kubernetes
        && let Some(url) = &config.store.api_url
        && !(url.starts_with("https://") || url.starts_with("http://"))
    {
        errors.push(ConfigError::Validation {
            message: format!("store.api_url `{url}` must start with http:// or https://"),
        });
    }

    for problem in uihub_core::types::validate_catalog_entries(&config.catalog) {
        errors.push(ConfigError::Validation { message: problem });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
