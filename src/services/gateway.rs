//! Persistence gateway - normalized reads and writes of the content document
//!
//! Thin layer between the HTTP endpoint and the raw store. Every read passes
//! through the normalizer (a missing key becomes the default document), every
//! write is normalized before it is persisted. The store handle is injected,
//! so tests run against `MemoryStore` without touching the network.

use crate::domain::content::SiteContent;
use crate::domain::normalize::{normalize_content, normalize_value};
use crate::infra::error::Result;
use crate::io::kv::ContentStore;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ContentGateway {
    store: Arc<dyn ContentStore>,
}

impl ContentGateway {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Read the current document, normalized. Missing key yields defaults.
    pub async fn read(&self) -> Result<SiteContent> {
        let stored = self.store.get().await?;
        debug!(found = stored.is_some(), "content_read");
        Ok(normalize_value(stored.as_ref()))
    }

    /// Normalize and persist a full document, returning the stored value
    pub async fn write(&self, content: &SiteContent) -> Result<SiteContent> {
        let normalized = normalize_content(content);
        let value = serde_json::to_value(&normalized)?;
        self.store.set(&value).await?;
        debug!("content_written");
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_content;
    use crate::io::kv::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_missing_key_yields_defaults() {
        let gateway = ContentGateway::new(Arc::new(MemoryStore::new()));
        assert_eq!(gateway.read().await.unwrap(), default_content());
    }

    #[tokio::test]
    async fn test_read_normalizes_partial_stored_value() {
        let store = MemoryStore::with_value(json!({
            "contactSection": { "phone": " 111 " }
        }));
        let gateway = ContentGateway::new(Arc::new(store));

        let content = gateway.read().await.unwrap();
        assert_eq!(content.contact_section.phone, "111");
        assert_eq!(content.program_days, default_content().program_days);
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrips_normalized() {
        let gateway = ContentGateway::new(Arc::new(MemoryStore::new()));

        let mut edited = default_content();
        edited.contact_section.email = "  new@gestalt.ru  ".to_string();

        let saved = gateway.write(&edited).await.unwrap();
        assert_eq!(saved.contact_section.email, "new@gestalt.ru");

        let read_back = gateway.read().await.unwrap();
        assert_eq!(read_back, saved);
        assert_eq!(read_back, normalize_content(&edited));
    }
}
