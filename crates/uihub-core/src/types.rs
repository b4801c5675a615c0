// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the catalog, registry, config and gateway crates.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::naming::is_dns_label;

/// Group/version/kind coordinate identifying where plugin resources live.
///
/// Plugin resources are cluster scoped: there is no namespace component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    /// Lowercase plural used in REST paths.
    pub plural: &'static str,
}

impl ResourceKind {
    /// Returns the `group/version` string used as a document's `apiVersion`.
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

/// The custom resource kind backing every plugin.
pub const PLUGIN_RESOURCE_KIND: ResourceKind = ResourceKind {
    group: "observability-ui.openshift.io",
    version: "v1alpha1",
    kind: "ObservabilityUIPlugin",
    plural: "observabilityuiplugins",
};

/// A reference from a plugin to a backend service it proxies to.
///
/// Decoding ignores unknown keys: stored documents may carry fields added by
/// the API server or by newer revisions of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Alias the plugin uses to address the service (e.g. "backend").
    pub alias: String,
    /// Name of the target service.
    #[serde(rename = "name")]
    pub target_name: String,
    /// Namespace of the target service.
    #[serde(rename = "namespace")]
    pub target_namespace: String,
    /// Target service port.
    pub port: u16,
}

/// A known plugin type and the template used to enable it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Resource name created when this plugin is enabled.
    pub name: String,
    /// Human-readable name shown in the console.
    pub display_name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin type accepted by the enable endpoint (e.g. "logs").
    #[serde(rename = "type")]
    pub plugin_type: String,
    /// Backend services the plugin depends on, in order.
    #[serde(default, deserialize_with = "strict_services")]
    pub services: Vec<ServiceBinding>,
}

/// Catalog form of [`ServiceBinding`], closed to unknown keys.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogService {
    alias: String,
    name: String,
    namespace: String,
    port: u16,
}

fn strict_services<'de, D>(deserializer: D) -> Result<Vec<ServiceBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    let services = Vec::<CatalogService>::deserialize(deserializer)?;
    Ok(services
        .into_iter()
        .map(|s| ServiceBinding {
            alias: s.alias,
            target_name: s.name,
            target_namespace: s.namespace,
            port: s.port,
        })
        .collect())
}

/// Read-only projection of a plugin returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginView {
    pub name: String,
    pub display_name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub is_enabled: bool,
}

impl PluginView {
    /// Builds a view from catalog metadata with the given enabled state.
    pub fn from_entry(entry: &CatalogEntry, is_enabled: bool) -> Self {
        Self {
            name: entry.name.clone(),
            display_name: entry.display_name.clone(),
            version: entry.version.clone(),
            plugin_type: entry.plugin_type.clone(),
            is_enabled,
        }
    }
}

/// Checks a set of catalog entries for structural problems.
///
/// Returns one message per problem found (does not fail fast). Empty
/// versions are not reported here; the resource translator rejects them at
/// enable time.
pub fn validate_catalog_entries(entries: &[CatalogEntry]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut names = HashSet::new();
    let mut types = HashSet::new();

    for (i, entry) in entries.iter().enumerate() {
        if !is_dns_label(&entry.name) {
            problems.push(format!(
                "catalog[{i}].name `{}` is not a valid DNS label",
                entry.name
            ));
        }
        if entry.plugin_type.trim().is_empty() {
            problems.push(format!("catalog[{i}].type must not be empty"));
        }
        if !names.insert(entry.name.as_str()) {
            problems.push(format!("duplicate catalog name `{}`", entry.name));
        }
        if !types.insert(entry.plugin_type.as_str()) {
            problems.push(format!("duplicate catalog type `{}`", entry.plugin_type));
        }
        for (j, service) in entry.services.iter().enumerate() {
            if service.port == 0 {
                problems.push(format!("catalog[{i}].services[{j}].port must be non-zero"));
            }
        }
    }

    problems
}
