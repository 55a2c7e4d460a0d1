//! Shared types for the HR workspace
//!
//! Common types used by the server crate and its tests: the unified
//! error system, the closed role set and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, ErrorCode};
pub use models::Role;
