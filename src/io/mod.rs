//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `kv` - key-value store access (REST client + in-memory store)
//! - `api` - the content HTTP endpoint (hyper)
//! - `api_client` - editor-side HTTP client for the endpoint

pub mod api;
pub mod api_client;
pub mod kv;

// Re-export commonly used types
pub use api::{start_api_server, ApiResponse, ApiState};
pub use api_client::{ApiClientConfig, ContentApi, HttpContentApi};
pub use kv::{ContentStore, HttpKvStore, KvConfig, MemoryStore};
