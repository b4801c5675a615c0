// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation of a plugin type into a complete resource definition.

use uihub_core::{HubError, PLUGIN_RESOURCE_KIND};

use crate::catalog::PluginCatalog;
use crate::resource::{provenance_labels, PluginResource, PluginSpec, ResourceMetadata};

/// Builds the resource that enables `plugin_type`.
///
/// Pure and deterministic given the catalog. Fails with
/// [`HubError::InvalidPluginType`] when the type is unknown or its catalog
/// entry has an empty name or version.
pub fn translate(catalog: &PluginCatalog, plugin_type: &str) -> Result<PluginResource, HubError> {
    let entry = catalog
        .lookup(plugin_type)
        .ok_or_else(|| HubError::InvalidPluginType(format!("unknown plugin type `{plugin_type}`")))?;

    // Configured catalogs may carry incomplete entries.
    if entry.name.is_empty() {
        return Err(HubError::InvalidPluginType(format!(
            "empty plugin name for plugin type `{plugin_type}`"
        )));
    }
    if entry.version.is_empty() {
        return Err(HubError::InvalidPluginType(format!(
            "no matching version for plugin type `{plugin_type}`"
        )));
    }

    Ok(PluginResource {
        api_version: PLUGIN_RESOURCE_KIND.api_version(),
        kind: PLUGIN_RESOURCE_KIND.kind.to_string(),
        metadata: ResourceMetadata {
            name: entry.name.clone(),
            labels: provenance_labels(&entry.name, &entry.version),
        },
        spec: PluginSpec {
            display_name: entry.display_name.clone(),
            version: entry.version.clone(),
            plugin_type: entry.plugin_type.clone(),
            services: entry.services.clone(),
        },
    })
}
