// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the observability UI hub.
//!
//! Provides the error type, the plugin types shared between crates, DNS
//! label validation for plugin names, and the [`ResourceStore`] trait that
//! store backends implement.

pub mod error;
pub mod naming;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HubError;
pub use traits::{ResourceStore, StoreError};
pub use types::{CatalogEntry, PluginView, ResourceKind, ServiceBinding, PLUGIN_RESOURCE_KIND};
