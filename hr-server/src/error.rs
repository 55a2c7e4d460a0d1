//! Handler-side error
//!
//! Storage failures are logged here and leave the process as a bare
//! `InternalError`; business errors pass through to the client unchanged.

use axum::Json;
use axum::response::{IntoResponse, Response};
use shared::error::{AppError, ErrorCode};

use crate::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Store behind a trait object, or a stored value that failed to parse
    #[error("store error: {0}")]
    Store(#[from] BoxError),
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(err) => err,
            other => {
                tracing::error!(error = %other, "Request failed in storage layer");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Handler result: JSON body or a service error
pub type ApiResult<T> = Result<Json<T>, ServiceError>;
