//! TOML configuration
//!
//! The config file path is resolved in order: the --config command line
//! argument, the CONFIG_FILE environment variable, then config/dev.toml.
//! Every section and field has a default, so a missing file degrades to a
//! memory-store dev setup with a warning instead of refusing to start.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// In-process store, content lost on restart. For local development.
    Memory,
    /// REST key-value store (Upstash/Vercel KV wire shape).
    Http,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub mode: StoreMode,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_content_key")]
    pub key: String,
    #[serde(default = "default_store_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_content_key() -> String {
    "site-content".to_string()
}

fn default_store_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::Memory,
            url: String::new(),
            token: String::new(),
            key: default_content_key(),
            timeout_ms: default_store_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminConfig {
    /// Bearer token required on PUT. Unset means edits are open (dev only).
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Endpoint the editor client talks to
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_endpoint() -> String {
    "http://localhost:8080/api/content".to_string()
}

fn default_api_timeout_ms() -> u64 {
    10000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { endpoint: default_api_endpoint(), timeout_ms: default_api_timeout_ms() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Flattened runtime configuration handed to the rest of the service
#[derive(Debug, Clone)]
pub struct Config {
    bind_address: String,
    server_port: u16,
    store_mode: StoreMode,
    store_url: String,
    store_token: String,
    content_key: String,
    store_timeout_ms: u64,
    admin_token: Option<String>,
    api_endpoint: String,
    api_timeout_ms: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            server_port: default_server_port(),
            store_mode: StoreMode::Memory,
            store_url: String::new(),
            store_token: String::new(),
            content_key: default_content_key(),
            store_timeout_ms: default_store_timeout_ms(),
            admin_token: None,
            api_endpoint: default_api_endpoint(),
            api_timeout_ms: default_api_timeout_ms(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Resolve the config file path: explicit CLI path, then the
    /// CONFIG_FILE environment variable, then config/dev.toml
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }
        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }
        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            bind_address: toml_config.server.bind_address,
            server_port: toml_config.server.port,
            store_mode: toml_config.store.mode,
            store_url: toml_config.store.url,
            store_token: toml_config.store.token,
            content_key: toml_config.store.key,
            store_timeout_ms: toml_config.store.timeout_ms,
            admin_token: toml_config.admin.token,
            api_endpoint: toml_config.api.endpoint,
            api_timeout_ms: toml_config.api.timeout_ms,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration from the given path, falling back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load configuration - resolves the path, then tries the TOML file
    pub fn load(cli_path: Option<&str>) -> Self {
        let config_path = Self::resolve_config_path(cli_path);
        Self::load_from_path(&config_path)
    }

    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn store_mode(&self) -> &StoreMode {
        &self.store_mode
    }

    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    pub fn store_token(&self) -> &str {
        &self.store_token
    }

    pub fn content_key(&self) -> &str {
        &self.content_key
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to set the admin token
    #[cfg(test)]
    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(token.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0");
        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.store_mode(), &StoreMode::Memory);
        assert_eq!(config.content_key(), "site-content");
        assert_eq!(config.store_timeout(), Duration::from_millis(5000));
        assert_eq!(config.admin_token(), None);
        assert_eq!(config.api_endpoint(), "http://localhost:8080/api/content");
    }

    #[test]
    fn test_resolve_config_path_order() {
        // One test covers all three sources so the CONFIG_FILE mutation
        // cannot race a parallel resolution test.
        env::remove_var("CONFIG_FILE");
        assert_eq!(Config::resolve_config_path(None), "config/dev.toml");

        env::set_var("CONFIG_FILE", "/etc/content-service/prod.toml");
        assert_eq!(Config::resolve_config_path(None), "/etc/content-service/prod.toml");
        assert_eq!(
            Config::resolve_config_path(Some("config/staging.toml")),
            "config/staging.toml"
        );
        env::remove_var("CONFIG_FILE");
    }

    #[test]
    fn test_with_admin_token() {
        let config = Config::default().with_admin_token("secret");
        assert_eq!(config.admin_token(), Some("secret"));
    }
}
