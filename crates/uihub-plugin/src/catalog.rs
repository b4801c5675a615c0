// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog.
//!
//! The catalog is the single source of truth for which plugin types exist,
//! the resource name each one is enabled under, and its default display
//! metadata and service bindings. It is built once at startup (either the
//! built-in table or entries from configuration) and injected into the
//! registry; nothing reads it through global state.

use uihub_core::types::validate_catalog_entries;
use uihub_core::{CatalogEntry, HubError, ServiceBinding};

/// Immutable, ordered table of known plugin types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCatalog {
    entries: Vec<CatalogEntry>,
}

impl PluginCatalog {
    /// Builds a catalog from configured entries, preserving their order.
    ///
    /// Rejects duplicate names or types, names that are not DNS labels, and
    /// empty types.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, HubError> {
        let problems = validate_catalog_entries(&entries);
        if !problems.is_empty() {
            return Err(HubError::Config(format!(
                "invalid plugin catalog: {}",
                problems.join("; ")
            )));
        }
        Ok(Self { entries })
    }

    /// Returns the catalog compiled into the binary.
    ///
    /// Contains two plugins:
    /// - logs (proxied to the LokiStack gateway)
    /// - dashboards
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                CatalogEntry {
                    name: "logs-observability-ui-plugin".to_string(),
                    display_name: "Logs".to_string(),
                    version: "dev".to_string(),
                    plugin_type: "logs".to_string(),
                    services: vec![ServiceBinding {
                        alias: "backend".to_string(),
                        target_name: "lokistack-dev".to_string(),
                        target_namespace: "openshift-logging".to_string(),
                        port: 8080,
                    }],
                },
                CatalogEntry {
                    name: "dashboards-observability-ui-plugin".to_string(),
                    display_name: "Dashboards".to_string(),
                    version: "dev".to_string(),
                    plugin_type: "dashboards".to_string(),
                    services: vec![],
                },
            ],
        }
    }

    /// Skips validation so tests can model a malformed catalog.
    #[cfg(test)]
    pub(crate) fn from_entries_unchecked(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Finds the entry for a plugin type.
    pub fn lookup(&self, plugin_type: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.plugin_type == plugin_type)
    }

    /// Finds the entry whose resource name is `name`.
    pub fn by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// All entries in catalog order.
    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
