//! `AppError` and the JSON body shape shared by every endpoint

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::codes::ErrorCode;

/// Client-facing error: a code, a message, optional field details.
///
/// Authentication and permission errors are built only through
/// [`AppError::unauthorized`] and [`AppError::forbidden`], which carry the
/// fixed generic message and no details.
#[derive(Debug, Clone, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Map<String, Value>>,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// `"<field> is required"`, with the field name in details
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    pub fn not_found(what: &str) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{what} not found"))
    }

    /// Generic 401; the rejection reason goes to the security log only.
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Generic 403; never names the resource or the missing role.
    pub fn forbidden() -> Self {
        Self::new(ErrorCode::PermissionDenied)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }
}

/// Body for message-only replies and for every error.
///
/// Successful data endpoints return their payload directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ApiResponse {
    /// Success reply carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: message.into(),
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.is_server_fault() {
            tracing::error!(code = %self.code, message = %self.message, "Server error response");
        }
        (self.http_status(), Json(ApiResponse::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_comes_from_code() {
        let err = AppError::new(ErrorCode::LeaveAlreadyDecided);
        assert_eq!(err.message, "Leave request has already been processed");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_required_names_the_field() {
        let err = AppError::required("email");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "email is required");
        assert_eq!(err.details.unwrap()["field"], "email");
    }

    #[test]
    fn test_auth_errors_are_generic() {
        let err = AppError::unauthorized();
        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Authentication required");
        assert!(err.details.is_none());

        let err = AppError::forbidden();
        assert_eq!(err.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Insufficient permissions");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_body_shapes() {
        let json = serde_json::to_value(ApiResponse::error(&AppError::forbidden())).unwrap();
        assert_eq!(json, serde_json::json!({ "code": 2001, "message": "Insufficient permissions" }));

        let json = serde_json::to_string(&ApiResponse::message("done")).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"done"}"#);
    }
}
