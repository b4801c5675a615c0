// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource store backends.
//!
//! - [`KubeStore`] - the cluster's Kubernetes API (production)
//! - [`MemoryStore`] - process-local map for development and tests

pub mod kube;
pub mod memory;

pub use kube::{in_cluster_api_url, KubeStore, KubeStoreConfig};
pub use memory::MemoryStore;
