//! Common utility functions
//!
//! - **[`serde`]**: Serialization helpers for wire and config formats

pub mod serde;

// Re-export commonly used items for convenience
pub use self::serde::{duration_millis, string_or_number};
