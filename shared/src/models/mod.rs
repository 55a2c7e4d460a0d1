//! Data models
//!
//! Shared between the server and the web client (via API).
//! Closed value sets are stored as TEXT columns and parsed with `FromStr`.

pub mod role;
pub mod status;

// Re-exports
pub use role::*;
pub use status::*;
