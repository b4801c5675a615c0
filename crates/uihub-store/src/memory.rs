// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory resource store.
//!
//! Behaves like a single API server for one resource kind: creates are
//! atomic per name and stamp the metadata a real server would add. Used for
//! local development (`store.backend = "memory"`) and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use uihub_core::{ResourceStore, StoreError};

/// Resource store holding documents in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, Value>,
    resource_version: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document verbatim, bypassing create semantics.
    ///
    /// Lets tests and fixtures seed documents the hub would never write,
    /// such as orphans or malformed payloads.
    pub fn insert_raw(&self, name: impl Into<String>, document: Value) {
        self.documents.insert(name.into(), document);
    }

    /// Snapshot of the stored document for `name`.
    pub fn document(&self, name: &str) -> Option<Value> {
        self.documents.get(name).map(|doc| doc.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn stamp(&self, document: &mut Value) {
        let version = self.resource_version.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(metadata) = document.get_mut("metadata").and_then(Value::as_object_mut) {
            metadata.insert(
                "uid".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
            metadata.insert(
                "creationTimestamp".to_string(),
                Value::String(
                    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                ),
            );
            metadata.insert(
                "resourceVersion".to_string(),
                Value::String(version.to_string()),
            );
        }
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn get(&self, name: &str) -> Result<Value, StoreError> {
        self.documents
            .get(name)
            .map(|doc| doc.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let mut items: Vec<(String, Value)> = self
            .documents
            .iter()
            .map(|doc| (doc.key().clone(), doc.value().clone()))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(items.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn create(&self, mut document: Value) -> Result<Value, StoreError> {
        let name = document
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| StoreError::Malformed {
                message: "document has no metadata.name".to_string(),
            })?;

        match self.documents.entry(name) {
            Entry::Occupied(entry) => Err(StoreError::Conflict {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                self.stamp(&mut document);
                entry.insert(document.clone());
                Ok(document)
            }
        }
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.documents
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }
}
