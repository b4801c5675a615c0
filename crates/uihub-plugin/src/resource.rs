// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed plugin resource and its mapping to and from store documents.
//!
//! The store speaks schema-less JSON documents. Decoding is an explicit step
//! returning [`HubError::Conversion`] on failure; it never panics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uihub_core::{HubError, PluginView, ServiceBinding};

pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
pub const LABEL_VERSION: &str = "app.kubernetes.io/version";
pub const LABEL_PART_OF: &str = "app.kubernetes.io/part-of";
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";
pub const LABEL_CREATED_BY: &str = "app.kubernetes.io/created-by";

/// Value of the `part-of` and `managed-by` labels on every plugin.
pub const OPERATOR_NAME: &str = "observability-ui-operator";

/// Value of the `created-by` label on every plugin.
pub const HUB_NAME: &str = "observability-ui-hub";

/// A plugin resource as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginResource {
    /// `group/version`; list items may omit it.
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    pub metadata: ResourceMetadata,
    pub spec: PluginSpec,
}

/// Subset of object metadata the hub reads or writes.
///
/// Store-managed fields (uid, resourceVersion, timestamps) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Desired state of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSpec {
    pub display_name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub plugin_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceBinding>,
}

impl PluginResource {
    /// Decodes a store document.
    pub fn from_document(document: serde_json::Value) -> Result<Self, HubError> {
        let resource: PluginResource = serde_json::from_value(document)
            .map_err(|e| HubError::Conversion(e.to_string()))?;
        if resource.metadata.name.is_empty() {
            return Err(HubError::Conversion(
                "document has an empty metadata.name".to_string(),
            ));
        }
        Ok(resource)
    }

    /// Encodes the resource as a store document.
    pub fn to_document(&self) -> Result<serde_json::Value, HubError> {
        serde_json::to_value(self).map_err(|e| {
            HubError::Conversion(format!(
                "cannot encode plugin `{}`: {e}",
                self.metadata.name
            ))
        })
    }

    /// Resource name (the store key).
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Projects the resource for the API. The resource exists, so it is
    /// reported as enabled.
    pub fn to_view(&self) -> PluginView {
        PluginView {
            name: self.metadata.name.clone(),
            display_name: self.spec.display_name.clone(),
            version: self.spec.version.clone(),
            plugin_type: self.spec.plugin_type.clone(),
            is_enabled: true,
        }
    }
}

/// Builds the fixed provenance label set for a plugin.
///
/// Only `name`, `instance` and `version` vary between plugins.
pub fn provenance_labels(name: &str, version: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (LABEL_NAME.to_string(), name.to_string()),
        (LABEL_INSTANCE.to_string(), name.to_string()),
        (LABEL_VERSION.to_string(), version.to_string()),
        (LABEL_PART_OF.to_string(), OPERATOR_NAME.to_string()),
        (LABEL_MANAGED_BY.to_string(), OPERATOR_NAME.to_string()),
        (LABEL_CREATED_BY.to_string(), HUB_NAME.to_string()),
    ])
}
