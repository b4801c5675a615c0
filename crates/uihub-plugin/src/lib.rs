// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog, resource translator, and registry service.
//!
//! The catalog lists the plugin types the hub knows how to enable. The
//! translator turns a type into the resource that enables it, and the
//! registry reconciles the catalog against live store contents.

pub mod catalog;
pub mod registry;
pub mod request;
pub mod resource;
pub mod translate;

pub use catalog::PluginCatalog;
pub use registry::{PluginRegistry, PluginState};
pub use request::PluginRequest;
pub use resource::PluginResource;
pub use translate::translate;
