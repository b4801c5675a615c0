// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource store trait for the system of record holding plugin resources.

use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a resource store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No resource with the given name exists.
    #[error("resource not found: {name}")]
    NotFound { name: String },

    /// A resource with the given name already exists.
    #[error("resource already exists: {name}")]
    Conflict { name: String },

    /// The store answered, but the payload is not a usable document.
    #[error("malformed store response: {message}")]
    Malformed { message: String },

    /// Transport failure, timeout, or unexpected status from the store.
    #[error("store request failed: {message}")]
    Unavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// A schema-less document store keyed by resource name within a fixed
/// group/version/kind.
///
/// Documents are exchanged as JSON values; decoding them into typed plugin
/// resources is the caller's job. `create` must be atomic with respect to
/// name collisions: of two concurrent creates for one name, exactly one
/// succeeds and the other fails with [`StoreError::Conflict`].
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// Short backend name used in logs (e.g. "kubernetes", "memory").
    fn backend(&self) -> &str;

    /// Fetches a single document by name.
    async fn get(&self, name: &str) -> Result<serde_json::Value, StoreError>;

    /// Lists every document of the kind.
    async fn list(&self) -> Result<Vec<serde_json::Value>, StoreError>;

    /// Persists a new document and returns the stored version, including
    /// any fields defaulted by the store.
    async fn create(&self, document: serde_json::Value) -> Result<serde_json::Value, StoreError>;

    /// Removes a document by name.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}
