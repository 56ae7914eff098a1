//! Infrastructure - configuration and error taxonomy
//!
//! This module contains infrastructure concerns:
//! - `config` - Application configuration (TOML loading, defaults)
//! - `error` - Service-wide error taxonomy

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, StoreMode};
pub use error::{ContentError, Result};
