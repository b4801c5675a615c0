// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the plugin API.
//!
//! Handles GET/DELETE /api/v1/plugins/{name}, GET /api/v1/plugins,
//! POST /api/v1/plugins/enable and GET /health.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde_json::{json, Value};
use uihub_core::PluginView;

use crate::error::ApiError;
use crate::server::GatewayState;

/// GET /api/v1/plugins/{name}
pub async fn get_plugin(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
) -> Result<Json<PluginView>, ApiError> {
    let view = state.registry.get(&name).await?;
    Ok(Json(view))
}

/// GET /api/v1/plugins
///
/// One entry per catalog plugin, in catalog order, with live enabled status.
pub async fn list_plugins(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<PluginView>>, ApiError> {
    let views = state.registry.list().await?;
    Ok(Json(views))
}

/// POST /api/v1/plugins/enable
///
/// Takes the raw body so a malformed payload is reported as 400 by the
/// registry rather than rejected by an extractor.
pub async fn enable_plugin(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<PluginView>, ApiError> {
    let view = state.registry.enable_from_body(&body).await?;
    Ok(Json(view))
}

/// DELETE /api/v1/plugins/{name}
pub async fn delete_plugin(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.registry.delete(&name).await?;
    Ok(Json(json!({})))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
