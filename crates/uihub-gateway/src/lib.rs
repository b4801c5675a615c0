// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the plugin registry.
//!
//! A thin axum layer: handlers delegate to [`uihub_plugin::PluginRegistry`]
//! and map its errors to status codes in [`error`].

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{status_for, ApiError};
pub use server::{build_router, serve, start_server, GatewayState, ServerConfig};
