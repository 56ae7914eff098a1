//! Error taxonomy for the content service
//!
//! Three failure classes cross component boundaries: validation failures
//! (user-correctable, mapped to 400), persistence failures (store unreachable
//! or refusing, mapped to 500), and client-side network failures (surfaced as
//! the editor's error state). HTTP handlers convert all of them into the
//! uniform success/error envelope; raw detail stays in the logs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ContentError>;

impl ContentError {
    /// True for errors the caller can fix by correcting the payload
    pub fn is_validation(&self) -> bool {
        matches!(self, ContentError::Validation(_))
    }
}
