//! Domain models - the site content document and its normalization
//!
//! This module contains the canonical data types and pure content logic:
//! - `content` - the `SiteContent` aggregate and its sections
//! - `defaults` - the seeded default document and per-entity placeholders
//! - `normalize` - total coercion of arbitrary stored input into a valid document
//! - `validate` - strict shape and minimum-length checks for PUT payloads

pub mod content;
pub mod defaults;
pub mod normalize;
pub mod validate;

// Re-export commonly used types
pub use content::SiteContent;
pub use defaults::default_content;
pub use normalize::{normalize_content, normalize_value, RawSiteContent};
pub use validate::validate_payload;
