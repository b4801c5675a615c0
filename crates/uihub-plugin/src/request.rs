// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enable request body parsing.

use serde::{Deserialize, Serialize};
use uihub_core::HubError;

/// Body of an enable request: `{"type": "<plugin type>"}`.
///
/// Unknown fields are rejected. A missing `type` decodes as empty and is
/// then refused by the translator as an invalid plugin type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginRequest {
    #[serde(rename = "type", default)]
    pub plugin_type: String,
}

impl PluginRequest {
    pub fn new(plugin_type: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
        }
    }

    /// Decodes a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, HubError> {
        serde_json::from_slice(body).map_err(|e| HubError::InvalidRequestBody(e.to_string()))
    }
}
