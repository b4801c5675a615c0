// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kubernetes API resource store.
//!
//! Talks to the cluster's REST API for a single cluster-scoped custom
//! resource kind: `/apis/{group}/{version}/{plural}[/{name}]`. Credentials
//! come from the pod's service account (bearer token plus cluster CA).

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use tracing::debug;
use uihub_core::{HubError, ResourceKind, ResourceStore, StoreError, PLUGIN_RESOURCE_KIND};

/// Default location of the mounted service account token.
pub const SERVICE_ACCOUNT_TOKEN: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Default location of the mounted cluster CA bundle.
pub const SERVICE_ACCOUNT_CA: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

/// Connection settings for [`KubeStore`].
#[derive(Clone)]
pub struct KubeStoreConfig {
    /// API server base URL, e.g. `https://10.0.0.1:443`.
    pub api_url: String,
    /// Bearer token sent with every request.
    pub bearer_token: Option<String>,
    /// PEM bundle trusted in addition to the system roots.
    pub ca_pem: Option<Vec<u8>>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for KubeStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeStoreConfig")
            .field("api_url", &self.api_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[redacted]"))
            .field("ca_pem", &self.ca_pem.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl KubeStoreConfig {
    /// Build settings from credential files.
    ///
    /// A missing token or CA file is not an error (the store then runs
    /// unauthenticated or with system roots only); an unreadable one is.
    pub fn from_files(
        api_url: String,
        token_file: &Path,
        ca_file: &Path,
        timeout: Duration,
    ) -> Result<Self, HubError> {
        let bearer_token = read_optional(token_file)?
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
            .filter(|token| !token.is_empty());
        let ca_pem = read_optional(ca_file)?;

        Ok(Self {
            api_url,
            bearer_token,
            ca_pem,
            timeout,
        })
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, HubError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(HubError::Config(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
    }
}

/// Derive the API server URL from the in-cluster service environment.
///
/// Returns `None` when not running inside a cluster.
pub fn in_cluster_api_url() -> Option<String> {
    let host = std::env::var("KUBERNETES_SERVICE_HOST").ok()?;
    let port = std::env::var("KUBERNETES_SERVICE_PORT").ok()?;
    Some(api_url_for(&host, &port))
}

fn api_url_for(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("https://[{host}]:{port}")
    } else {
        format!("https://{host}:{port}")
    }
}

/// Resource store backed by the Kubernetes API server.
#[derive(Debug, Clone)]
pub struct KubeStore {
    client: reqwest::Client,
    base_url: String,
    kind: ResourceKind,
}

impl KubeStore {
    /// Create a store for plugin resources.
    pub fn new(config: &KubeStoreConfig) -> Result<Self, HubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| HubError::Config(format!("invalid bearer token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);

        if let Some(pem) = &config.ca_pem {
            let certificate = reqwest::Certificate::from_pem(pem)
                .map_err(|e| HubError::Config(format!("invalid cluster CA bundle: {e}")))?;
            builder = builder.add_root_certificate(certificate);
        }

        let client = builder
            .build()
            .map_err(|e| HubError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            kind: PLUGIN_RESOURCE_KIND,
        })
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/apis/{}/{}/{}",
            self.base_url, self.kind.group, self.kind.version, self.kind.plural
        )
    }

    fn item_url(&self, name: &str) -> String {
        format!("{}/{name}", self.collection_url())
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, StoreError> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| StoreError::Unavailable {
            message: format!("{method} {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(%method, url, status = %response.status(), "kubernetes api response");
        Ok(response)
    }
}

/// Map a non-success response for an item request onto a store error.
async fn item_failure(response: Response, name: &str) -> StoreError {
    match response.status() {
        StatusCode::NOT_FOUND => StoreError::NotFound {
            name: name.to_string(),
        },
        StatusCode::CONFLICT => StoreError::Conflict {
            name: name.to_string(),
        },
        _ => unexpected_status(response).await,
    }
}

async fn unexpected_status(response: Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    StoreError::Unavailable {
        message: format!("kubernetes api returned {status}: {}", body.trim()),
        source: None,
    }
}

async fn read_document(response: Response) -> Result<Value, StoreError> {
    let bytes = response.bytes().await.map_err(|e| StoreError::Unavailable {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
        message: format!("response is not a JSON document: {e}"),
    })
}

#[async_trait]
impl ResourceStore for KubeStore {
    fn backend(&self) -> &str {
        "kubernetes"
    }

    async fn get(&self, name: &str) -> Result<Value, StoreError> {
        let response = self.send(Method::GET, &self.item_url(name), None).await?;
        if !response.status().is_success() {
            return Err(item_failure(response, name).await);
        }
        read_document(response).await
    }

    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let response = self.send(Method::GET, &self.collection_url(), None).await?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }

        match read_document(response).await? {
            Value::Object(mut list) => match list.remove("items") {
                Some(Value::Array(items)) => Ok(items),
                Some(Value::Null) | None => Ok(Vec::new()),
                Some(_) => Err(StoreError::Malformed {
                    message: "list `items` is not an array".to_string(),
                }),
            },
            _ => Err(StoreError::Malformed {
                message: "list response is not an object".to_string(),
            }),
        }
    }

    async fn create(&self, document: Value) -> Result<Value, StoreError> {
        let name = document
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let response = self
            .send(Method::POST, &self.collection_url(), Some(&document))
            .await?;
        if !response.status().is_success() {
            return Err(item_failure(response, &name).await);
        }
        read_document(response).await
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let response = self.send(Method::DELETE, &self.item_url(name), None).await?;
        if !response.status().is_success() {
            return Err(item_failure(response, name).await);
        }
        Ok(())
    }
}
