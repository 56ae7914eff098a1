//! HTTP client for the content endpoint
//!
//! The editor side of the wire: `load` fetches the current document, `save`
//! PUTs a full replacement. `ContentApi` is the seam the save queue works
//! against, so queue behavior is testable without a running server.

use crate::domain::content::SiteContent;
use crate::infra::config::Config;
use crate::infra::error::{ContentError, Result};
use crate::io::api::ApiResponse;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Editor-facing content API
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn load(&self) -> Result<SiteContent>;
    async fn save(&self, content: &SiteContent) -> Result<SiteContent>;
}

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api/content".to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ApiClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.api_endpoint().to_string(),
            token: config.admin_token().map(|t| t.to_string()),
            timeout: config.api_timeout(),
        }
    }
}

pub struct HttpContentApi {
    config: ApiClientConfig,
    client: reqwest::Client,
}

impl HttpContentApi {
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ContentError::Config(format!("failed to build api client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Map a response to the envelope's payload or the server's error message
    async fn unwrap_envelope(response: reqwest::Response) -> Result<SiteContent> {
        let status = response.status();
        let envelope: ApiResponse<SiteContent> = response.json().await?;

        match envelope {
            ApiResponse { success: true, data: Some(content), .. } if status.is_success() => {
                Ok(content)
            }
            ApiResponse { error, .. } => {
                let message = error.unwrap_or_else(|| format!("status {}", status.as_u16()));
                if status == reqwest::StatusCode::BAD_REQUEST {
                    Err(ContentError::Validation(message))
                } else {
                    Err(ContentError::Persistence(message))
                }
            }
        }
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn load(&self) -> Result<SiteContent> {
        debug!(endpoint = %self.config.endpoint, "content_load_request");
        let response = self.client.get(&self.config.endpoint).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn save(&self, content: &SiteContent) -> Result<SiteContent> {
        debug!(endpoint = %self.config.endpoint, "content_save_request");
        let mut request = self.client.put(&self.config.endpoint).json(content);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::unwrap_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_content;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, token: Option<&str>) -> HttpContentApi {
        HttpContentApi::new(ApiClientConfig {
            endpoint: format!("{}/api/content", server.base_url()),
            token: token.map(|t| t.to_string()),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/content");
            then.status(200)
                .json_body(json!({ "success": true, "data": default_content() }));
        });

        let api = client_for(&server, None);
        assert_eq!(api.load().await.unwrap(), default_content());
    }

    #[tokio::test]
    async fn test_load_server_error_surfaces_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/content");
            then.status(500)
                .json_body(json!({ "success": false, "error": "Не удалось загрузить данные" }));
        });

        let api = client_for(&server, None);
        let err = api.load().await.unwrap_err();
        assert!(err.to_string().contains("Не удалось загрузить данные"));
    }

    #[tokio::test]
    async fn test_save_sends_bearer_token_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/content")
                .header("authorization", "Bearer secret")
                .body_contains("programDays");
            then.status(200)
                .json_body(json!({ "success": true, "data": default_content() }));
        });

        let api = client_for(&server, Some("secret"));
        let saved = api.save(&default_content()).await.unwrap();
        assert_eq!(saved, default_content());
        mock.assert();
    }

    #[tokio::test]
    async fn test_save_validation_failure_maps_to_validation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/api/content");
            then.status(400)
                .json_body(json!({ "success": false, "error": "Некорректные данные" }));
        });

        let api = client_for(&server, None);
        let err = api.save(&default_content()).await.unwrap_err();
        assert!(err.is_validation());
    }
}
