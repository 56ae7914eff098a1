//! Services - content persistence and the editor save queue
//!
//! This module contains the core service logic:
//! - `gateway` - normalized reads/writes of the document over an injected store
//! - `save_queue` - editor-side queue coalescing edits into one in-flight save

pub mod gateway;
pub mod save_queue;

// Re-export commonly used types
pub use gateway::ContentGateway;
pub use save_queue::{QueueStatus, SaveQueue};
