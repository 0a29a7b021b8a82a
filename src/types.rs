//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this crate and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Date and time types for sample timestamps and label rendering.
pub use chrono::{DateTime, FixedOffset, Utc};
/// Parsed WebSocket endpoint URL.
pub use url::Url;
