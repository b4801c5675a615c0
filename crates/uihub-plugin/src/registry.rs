// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry service.
//!
//! The `PluginRegistry` validates input, translates enable requests through
//! the catalog, and round-trips every operation to the resource store. It
//! holds no cache and no mutable state: uniqueness is enforced by the
//! store's atomic create, and whatever consistency the store offers is
//! passed through unchanged.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use uihub_core::naming::validate_plugin_name;
use uihub_core::{HubError, PluginView, ResourceStore};

use crate::catalog::PluginCatalog;
use crate::request::PluginRequest;
use crate::resource::PluginResource;
use crate::translate::translate;

/// Lifecycle state of a plugin name in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    /// No resource exists; `enable` may create one.
    Unregistered,
    /// A resource exists; `delete` may remove it.
    Registered,
}

impl std::fmt::Display for PluginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginState::Unregistered => write!(f, "unregistered"),
            PluginState::Registered => write!(f, "registered"),
        }
    }
}

/// Registry of plugin resources backed by a remote store.
pub struct PluginRegistry {
    catalog: PluginCatalog,
    store: Arc<dyn ResourceStore>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("catalog", &self.catalog.len())
            .field("store", &self.store.backend())
            .finish()
    }
}

impl PluginRegistry {
    /// Create a registry over an injected catalog and store.
    pub fn new(catalog: PluginCatalog, store: Arc<dyn ResourceStore>) -> Self {
        Self { catalog, store }
    }

    /// Name of the store backend, for logging.
    pub fn backend(&self) -> &str {
        self.store.backend()
    }

    /// Fetch a single plugin by resource name.
    ///
    /// Invalid names fail with [`HubError::InvalidName`] before any store
    /// call is made.
    pub async fn get(&self, name: &str) -> Result<PluginView, HubError> {
        validate_plugin_name(name)?;

        let document = self.store.get(name).await?;
        let resource = PluginResource::from_document(document)?;
        debug!(name, "fetched observability ui plugin");
        Ok(resource.to_view())
    }

    /// List every catalog entry, in catalog order, with its live enabled
    /// state.
    ///
    /// The result always has exactly one view per catalog entry. Store
    /// resources whose name matches no entry are ignored.
    pub async fn list(&self) -> Result<Vec<PluginView>, HubError> {
        let documents = self.store.list().await?;

        let mut live = HashSet::with_capacity(documents.len());
        for document in documents {
            let resource = PluginResource::from_document(document)?;
            if self.catalog.by_name(resource.name()).is_none() {
                debug!(name = %resource.name(), "ignoring plugin resource with no catalog entry");
            }
            live.insert(resource.metadata.name);
        }

        Ok(self
            .catalog
            .all()
            .iter()
            .map(|entry| PluginView::from_entry(entry, live.contains(&entry.name)))
            .collect())
    }

    /// Enable a plugin type by creating its resource.
    ///
    /// Not idempotent: enabling an already-registered plugin fails with
    /// [`HubError::CreateConflict`]. The returned view is decoded from the
    /// document the store hands back, so store-side defaulting is visible.
    pub async fn enable(&self, request: &PluginRequest) -> Result<PluginView, HubError> {
        let resource = translate(&self.catalog, &request.plugin_type)?;
        let document = resource.to_document()?;

        info!(
            name = %resource.name(),
            plugin_type = %request.plugin_type,
            backend = self.store.backend(),
            "creating observability ui plugin"
        );

        let created = self.store.create(document).await?;
        let created = PluginResource::from_document(created)?;
        Ok(created.to_view())
    }

    /// Decode a raw enable request body and enable the requested type.
    pub async fn enable_from_body(&self, body: &[u8]) -> Result<PluginView, HubError> {
        let request = PluginRequest::from_slice(body)?;
        self.enable(&request).await
    }

    /// Delete a plugin resource by name.
    ///
    /// Checks existence first, then deletes: two store round trips that are
    /// not atomic together. A delete racing in between surfaces as
    /// [`HubError::NotFound`] from the second call.
    pub async fn delete(&self, name: &str) -> Result<(), HubError> {
        validate_plugin_name(name)?;

        self.store.get(name).await?;
        self.store.delete(name).await?;

        info!(name, "deleted observability ui plugin");
        Ok(())
    }

    /// Report whether a resource currently exists for `name`.
    pub async fn state(&self, name: &str) -> Result<PluginState, HubError> {
        match self.get(name).await {
            Ok(_) => Ok(PluginState::Registered),
            Err(HubError::NotFound(_)) => Ok(PluginState::Unregistered),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use uihub_core::{CatalogEntry, StoreError};
    use uihub_store::MemoryStore;

    const LOGS: &str = "logs-observability-ui-plugin";
    const DASHBOARDS: &str = "dashboards-observability-ui-plugin";

    /// Wraps a store and counts calls per operation.
    struct CountingStore {
        inner: MemoryStore,
        gets: AtomicUsize,
        lists: AtomicUsize,
        creates: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                gets: AtomicUsize::new(0),
                lists: AtomicUsize::new(0),
                creates: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            }
        }

        fn total(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
                + self.lists.load(Ordering::SeqCst)
                + self.creates.load(Ordering::SeqCst)
                + self.deletes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceStore for CountingStore {
        fn backend(&self) -> &str {
            "counting"
        }

        async fn get(&self, name: &str) -> Result<Value, StoreError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(name).await
        }

        async fn list(&self) -> Result<Vec<Value>, StoreError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list().await
        }

        async fn create(&self, document: Value) -> Result<Value, StoreError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.inner.create(document).await
        }

        async fn delete(&self, name: &str) -> Result<(), StoreError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(name).await
        }
    }

    /// A store whose every call fails as unreachable.
    struct DownStore;

    #[async_trait]
    impl ResourceStore for DownStore {
        fn backend(&self) -> &str {
            "down"
        }

        async fn get(&self, _name: &str) -> Result<Value, StoreError> {
            Err(unavailable())
        }

        async fn list(&self) -> Result<Vec<Value>, StoreError> {
            Err(unavailable())
        }

        async fn create(&self, _document: Value) -> Result<Value, StoreError> {
            Err(unavailable())
        }

        async fn delete(&self, _name: &str) -> Result<(), StoreError> {
            Err(unavailable())
        }
    }

    /// Scripted replies: `get` and `list` always find `existing`, `create`
    /// answers `created`, `delete` fails through `delete_error`.
    struct ScriptedStore {
        existing: Value,
        created: Value,
        delete_error: fn(&str) -> StoreError,
        deletes: AtomicUsize,
    }

    impl ScriptedStore {
        fn deleting_with(delete_error: fn(&str) -> StoreError) -> Self {
            Self {
                existing: stored_logs(),
                created: stored_logs(),
                delete_error,
                deletes: AtomicUsize::new(0),
            }
        }

        fn creating(created: Value) -> Self {
            Self {
                created,
                ..Self::deleting_with(|name| StoreError::NotFound { name: name.into() })
            }
        }
    }

    #[async_trait]
    impl ResourceStore for ScriptedStore {
        fn backend(&self) -> &str {
            "scripted"
        }

        async fn get(&self, _name: &str) -> Result<Value, StoreError> {
            Ok(self.existing.clone())
        }

        async fn list(&self) -> Result<Vec<Value>, StoreError> {
            Ok(vec![self.existing.clone()])
        }

        async fn create(&self, _document: Value) -> Result<Value, StoreError> {
            Ok(self.created.clone())
        }

        async fn delete(&self, name: &str) -> Result<(), StoreError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Err((self.delete_error)(name))
        }
    }

    fn stored_logs() -> Value {
        json!({
            "metadata": {"name": LOGS},
            "spec": {"displayName": "Logs", "version": "dev", "type": "logs"}
        })
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable {
            message: "connection refused".into(),
            source: None,
        }
    }

    fn registry_with(store: Arc<dyn ResourceStore>) -> PluginRegistry {
        PluginRegistry::new(PluginCatalog::builtin(), store)
    }

    fn memory_registry() -> (PluginRegistry, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (registry_with(store.clone()), store)
    }

    fn enabled(views: &[PluginView]) -> Vec<(&str, bool)> {
        views
            .iter()
            .map(|v| (v.name.as_str(), v.is_enabled))
            .collect()
    }

    #[tokio::test]
    async fn list_on_empty_store_reports_all_disabled() {
        let (registry, _) = memory_registry();
        let views = registry.list().await.unwrap();
        assert_eq!(enabled(&views), vec![(LOGS, false), (DASHBOARDS, false)]);
        assert_eq!(views[0].display_name, "Logs");
        assert_eq!(views[1].plugin_type, "dashboards");
    }

    #[tokio::test]
    async fn enable_logs_creates_resource() {
        let (registry, store) = memory_registry();
        let view = registry.enable(&PluginRequest::new("logs")).await.unwrap();

        assert_eq!(view.name, LOGS);
        assert_eq!(view.version, "dev");
        assert!(view.is_enabled);

        let stored = store.get(LOGS).await.unwrap();
        assert_eq!(
            stored["spec"]["services"],
            json!([{
                "alias": "backend",
                "name": "lokistack-dev",
                "namespace": "openshift-logging",
                "port": 8080
            }])
        );
    }

    #[tokio::test]
    async fn enable_only_flips_the_enabled_entry() {
        let (registry, _) = memory_registry();
        registry.enable(&PluginRequest::new("dashboards")).await.unwrap();

        let views = registry.list().await.unwrap();
        assert_eq!(enabled(&views), vec![(LOGS, false), (DASHBOARDS, true)]);
    }

    #[tokio::test]
    async fn enable_twice_conflicts() {
        let (registry, _) = memory_registry();
        registry.enable(&PluginRequest::new("logs")).await.unwrap();
        let err = registry.enable(&PluginRequest::new("logs")).await.unwrap_err();
        assert!(matches!(err, HubError::CreateConflict(_)));
    }

    #[tokio::test]
    async fn enable_unknown_type_does_not_touch_store() {
        let store = Arc::new(CountingStore::new());
        let registry = registry_with(store.clone());
        let err = registry
            .enable(&PluginRequest::new("unknown"))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidPluginType(_)));
        assert_eq!(store.total(), 0);
    }

    #[tokio::test]
    async fn enable_from_body_rejects_unknown_field_without_store_call() {
        let store = Arc::new(CountingStore::new());
        let registry = registry_with(store.clone());
        let err = registry
            .enable_from_body(br#"{"type":"logs","extra":"x"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidRequestBody(_)));
        assert_eq!(store.total(), 0);
    }

    #[tokio::test]
    async fn enable_from_body_missing_type_is_invalid_type() {
        let (registry, _) = memory_registry();
        let err = registry.enable_from_body(b"{}").await.unwrap_err();
        assert!(matches!(err, HubError::InvalidPluginType(_)));
    }

    #[tokio::test]
    async fn get_returns_enabled_view() {
        let (registry, _) = memory_registry();
        registry.enable(&PluginRequest::new("logs")).await.unwrap();
        let view = registry.get(LOGS).await.unwrap();
        assert_eq!(view.display_name, "Logs");
        assert_eq!(view.plugin_type, "logs");
        assert!(view.is_enabled);
    }

    #[tokio::test]
    async fn get_invalid_name_makes_no_store_call() {
        let store = Arc::new(CountingStore::new());
        let registry = registry_with(store.clone());
        let err = registry.get("Invalid_Name!").await.unwrap_err();
        assert!(matches!(err, HubError::InvalidName(_)));
        assert_eq!(store.total(), 0);
    }

    #[tokio::test]
    async fn get_undecodable_document_is_conversion_error() {
        let (registry, store) = memory_registry();
        store.insert_raw(LOGS, json!({"metadata": {"name": LOGS}, "spec": "nope"}));
        let err = registry.get(LOGS).await.unwrap_err();
        assert!(matches!(err, HubError::Conversion(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (registry, _) = memory_registry();
        registry.enable(&PluginRequest::new("logs")).await.unwrap();
        registry.delete(LOGS).await.unwrap();
        let err = registry.get(LOGS).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_absent_is_not_found_after_single_check() {
        let store = Arc::new(CountingStore::new());
        let registry = registry_with(store.clone());
        let err = registry.delete(LOGS).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound(_)));
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_checks_then_deletes() {
        let store = Arc::new(CountingStore::new());
        let registry = registry_with(store.clone());
        registry.enable(&PluginRequest::new("logs")).await.unwrap();
        registry.delete(LOGS).await.unwrap();
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_racing_removal_is_not_found() {
        let store = Arc::new(ScriptedStore::deleting_with(|name| StoreError::NotFound {
            name: name.into(),
        }));
        let registry = registry_with(store.clone());
        let err = registry.delete(LOGS).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound(n) if n == LOGS));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_failing_after_check_is_store_unavailable() {
        let store = Arc::new(ScriptedStore::deleting_with(|_| unavailable()));
        let registry = registry_with(store.clone());
        let err = registry.delete(LOGS).await.unwrap_err();
        assert!(matches!(err, HubError::StoreUnavailable { .. }));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn enable_with_undecodable_create_reply_is_conversion_error() {
        let store = ScriptedStore::creating(json!({
            "metadata": {"name": LOGS},
            "spec": {"version": 7}
        }));
        let registry = registry_with(Arc::new(store));
        let err = registry.enable(&PluginRequest::new("logs")).await.unwrap_err();
        assert!(matches!(err, HubError::Conversion(_)));
    }

    #[tokio::test]
    async fn stored_service_with_extra_fields_still_decodes() {
        let (registry, store) = memory_registry();
        store.insert_raw(
            LOGS,
            json!({
                "metadata": {"name": LOGS},
                "spec": {
                    "displayName": "Logs",
                    "version": "dev",
                    "type": "logs",
                    "services": [{
                        "alias": "backend",
                        "name": "lokistack-dev",
                        "namespace": "openshift-logging",
                        "port": 8080,
                        "protocol": "TCP"
                    }]
                }
            }),
        );

        let view = registry.get(LOGS).await.unwrap();
        assert!(view.is_enabled);

        let views = registry.list().await.unwrap();
        assert_eq!(enabled(&views), vec![(LOGS, true), (DASHBOARDS, false)]);
    }

    #[tokio::test]
    async fn delete_invalid_name_makes_no_store_call() {
        let store = Arc::new(CountingStore::new());
        let registry = registry_with(store.clone());
        let err = registry.delete("-bad").await.unwrap_err();
        assert!(matches!(err, HubError::InvalidName(_)));
        assert_eq!(store.total(), 0);
    }

    #[tokio::test]
    async fn state_machine_round_trip() {
        let (registry, _) = memory_registry();
        assert_eq!(registry.state(LOGS).await.unwrap(), PluginState::Unregistered);
        registry.enable(&PluginRequest::new("logs")).await.unwrap();
        assert_eq!(registry.state(LOGS).await.unwrap(), PluginState::Registered);
        registry.delete(LOGS).await.unwrap();
        assert_eq!(registry.state(LOGS).await.unwrap(), PluginState::Unregistered);
    }

    #[tokio::test]
    async fn list_ignores_orphan_resources() {
        let (registry, store) = memory_registry();
        store.insert_raw(
            "orphan-plugin",
            json!({
                "metadata": {"name": "orphan-plugin"},
                "spec": {"displayName": "Orphan", "version": "1", "type": "orphan"}
            }),
        );
        let views = registry.list().await.unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.name != "orphan-plugin"));
        assert!(views.iter().all(|v| !v.is_enabled));
    }

    #[tokio::test]
    async fn list_malformed_item_is_conversion_error() {
        let (registry, store) = memory_registry();
        store.insert_raw("broken", json!({"spec": {}}));
        let err = registry.list().await.unwrap_err();
        assert!(matches!(err, HubError::Conversion(_)));
    }

    #[tokio::test]
    async fn list_uses_injected_catalog_order() {
        let catalog = PluginCatalog::new(vec![
            CatalogEntry {
                name: "traces-plugin".into(),
                display_name: "Traces".into(),
                version: "0.2.0".into(),
                plugin_type: "traces".into(),
                services: vec![],
            },
            CatalogEntry {
                name: "metrics-plugin".into(),
                display_name: "Metrics".into(),
                version: "0.1.0".into(),
                plugin_type: "metrics".into(),
                services: vec![],
            },
        ])
        .unwrap();
        let registry = PluginRegistry::new(catalog, Arc::new(MemoryStore::new()));
        registry.enable(&PluginRequest::new("metrics")).await.unwrap();

        let views = registry.list().await.unwrap();
        assert_eq!(
            enabled(&views),
            vec![("traces-plugin", false), ("metrics-plugin", true)]
        );
    }

    #[tokio::test]
    async fn store_outage_maps_to_store_unavailable() {
        let registry = registry_with(Arc::new(DownStore));
        assert!(matches!(
            registry.list().await,
            Err(HubError::StoreUnavailable { .. })
        ));
        assert!(matches!(
            registry.get(LOGS).await,
            Err(HubError::StoreUnavailable { .. })
        ));
        assert!(matches!(
            registry.enable(&PluginRequest::new("logs")).await,
            Err(HubError::StoreUnavailable { .. })
        ));
        assert!(matches!(
            registry.delete(LOGS).await,
            Err(HubError::StoreUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn concurrent_enables_yield_one_success() {
        let (registry, _) = memory_registry();
        let registry = Arc::new(registry);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.enable(&PluginRequest::new("logs")).await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(HubError::CreateConflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
    }

    proptest! {
        #[test]
        fn absent_valid_names_are_not_found(name in "[a-z0-9]([-a-z0-9]{0,61}[a-z0-9])?") {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (registry, _) = memory_registry();
            let result = rt.block_on(registry.get(&name));
            prop_assert!(matches!(result, Err(HubError::NotFound(_))));
        }
    }
}
