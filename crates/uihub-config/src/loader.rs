// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./uihub.toml` > `~/.config/uihub/uihub.toml` > `/etc/uihub/uihub.toml`
//! with environment variable overrides via `UIHUB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::UiHubConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/uihub/uihub.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "uihub.toml";

/// `~/.config/uihub/uihub.toml`, when a user config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("uihub/uihub.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/uihub/uihub.toml`
/// 3. `~/.config/uihub/uihub.toml`
/// 4. `./uihub.toml`
/// 5. `UIHUB_*` environment variables
pub fn load_config() -> Result<UiHubConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<UiHubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UiHubConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the XDG lookup, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<UiHubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UiHubConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment without extracting it.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(UiHubConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `UIHUB_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys that contain
/// underscores stay intact: `UIHUB_STORE_API_URL` is `store.api_url`.
fn env_provider() -> Env {
    Env::prefixed("UIHUB_").map(|key| {
        let key_str = key.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("server_") {
            format!("server.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("store_") {
            format!("store.{rest}")
        } else {
            key_str.to_string()
        };
        mapped.into()
    })
}
