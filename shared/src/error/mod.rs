//! Error codes, `AppError` and the JSON error body
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::LeaveNotFound);
//! assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
//! let body = ApiResponse::error(&err);
//! assert_eq!(body.code, 8301);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
