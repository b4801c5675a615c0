// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A resource store that is always down.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use uihub_core::{ResourceStore, StoreError};

/// Store whose every call fails with [`StoreError::Unavailable`].
///
/// Counts calls so tests can assert that input validation short-circuits
/// before the store is touched.
#[derive(Debug)]
pub struct FailingStore {
    message: String,
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable {
            message: self.message.clone(),
            source: None,
        })
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

#[async_trait]
impl ResourceStore for FailingStore {
    fn backend(&self) -> &str {
        "failing"
    }

    async fn get(&self, _name: &str) -> Result<Value, StoreError> {
        self.fail()
    }

    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        self.fail()
    }

    async fn create(&self, _document: Value) -> Result<Value, StoreError> {
        self.fail()
    }

    async fn delete(&self, _name: &str) -> Result<(), StoreError> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_fails_and_is_counted() {
        let store = FailingStore::default();
        assert!(store.get("logs").await.is_err());
        assert!(store.list().await.is_err());
        assert!(store.create(Value::Null).await.is_err());
        assert!(matches!(
            store.delete("logs").await,
            Err(StoreError::Unavailable { message, .. }) if message == "connection refused"
        ));
        assert_eq!(store.calls(), 4);
    }
}
