//! Handler extractors for the authenticated caller

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::AppError;
use uuid::Uuid;

use super::policy;
use super::principal::Principal;

/// Principal inserted by `require_auth`
impl<S: Send + Sync> FromRequestParts<S> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}

/// The caller's own employee id, for self-service routes.
///
/// Rejects with 403 when the principal has no employee profile.
#[derive(Debug, Clone, Copy)]
pub struct OwnEmployee(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for OwnEmployee {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        policy::own_employee(&principal).map(OwnEmployee)
    }
}
