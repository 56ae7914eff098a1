//! Key-value store access for the content document
//!
//! The document lives under a single fixed key. `ContentStore` is the seam:
//! production uses `HttpKvStore` against an Upstash/Vercel-style REST store
//! (`GET {base}/get/{key}`, `POST {base}/set/{key}`, bearer auth, responses
//! wrapped in `{"result": ...}`), tests and local runs use `MemoryStore`.
//! Atomicity of the single-key overwrite is the store's guarantee, not ours.

use crate::infra::config::Config;
use crate::infra::error::{ContentError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Log a store request failure (cold path)
#[cold]
fn log_store_error(op: &str, e: &dyn std::fmt::Display) {
    error!(op = %op, error = %e, "kv_store_request_failed");
}

/// Raw access to the single content key
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the stored value. `None` when the key does not exist yet.
    async fn get(&self) -> Result<Option<Value>>;
    /// Overwrite the stored value.
    async fn set(&self, value: &Value) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct KvConfig {
    pub base_url: String,
    pub token: String,
    pub key: String,
    pub timeout: Duration,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8079".to_string(),
            token: String::new(),
            key: "site-content".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl KvConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.store_url().trim_end_matches('/').to_string(),
            token: config.store_token().to_string(),
            key: config.content_key().to_string(),
            timeout: config.store_timeout(),
        }
    }
}

/// REST key-value store client
pub struct HttpKvStore {
    config: KvConfig,
    client: reqwest::Client,
}

impl HttpKvStore {
    pub fn new(config: KvConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ContentError::Config(format!("failed to build store client: {e}")))?;
        Ok(Self { config, client })
    }

    fn url(&self, op: &str) -> String {
        format!("{}/{}/{}", self.config.base_url, op, self.config.key)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.config.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.config.token)
        }
    }
}

#[async_trait]
impl ContentStore for HttpKvStore {
    async fn get(&self) -> Result<Option<Value>> {
        let response = self
            .authorized(self.client.get(self.url("get")))
            .send()
            .await
            .map_err(|e| {
                log_store_error("get", &e);
                ContentError::Persistence(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Persistence(format!(
                "store get returned {}",
                status.as_u16()
            )));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| ContentError::Persistence(format!("store get body unreadable: {e}")))?;
        match envelope.get("result") {
            None | Some(Value::Null) => Ok(None),
            // The store keeps the document as a JSON string under "result"
            Some(Value::String(raw)) => match serde_json::from_str(raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    // Unparseable blob is treated as an absent key; the
                    // normalizer supplies the defaults.
                    warn!(error = %e, "kv_stored_value_unparseable");
                    Ok(None)
                }
            },
            Some(other) => Ok(Some(other.clone())),
        }
    }

    async fn set(&self, value: &Value) -> Result<()> {
        let body = serde_json::to_string(value)?;
        let response = self
            .authorized(self.client.post(self.url("set")))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                log_store_error("set", &e);
                ContentError::Persistence(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Persistence(format!(
                "store set returned {}",
                status.as_u16()
            )));
        }

        debug!(key = %self.config.key, "kv_value_stored");
        Ok(())
    }
}

/// In-memory store for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial value
    pub fn with_value(value: Value) -> Self {
        Self { value: Mutex::new(Some(value)) }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self) -> Result<Option<Value>> {
        Ok(self.value.lock().clone())
    }

    async fn set(&self, value: &Value) -> Result<()> {
        *self.value.lock() = Some(value.clone());
        Ok(())
    }
}
