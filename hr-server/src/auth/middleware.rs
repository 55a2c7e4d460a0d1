//! Authentication middleware and the per-route gate

use std::future::Future;
use std::pin::Pin;

use axum::{
    RequestExt,
    extract::{RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;
use uuid::Uuid;

use super::jwt::{JwtService, bearer_token};
use super::policy::{self, Ownership, Route};
use super::principal::{Principal, PrincipalStore};
use crate::security_log;
use crate::state::AppState;

/// Resolve a bearer token to the current principal.
///
/// Validates signature and expiry, then re-reads the subject from the store;
/// role and employee link always come from the store, never from claims.
/// Every rejection is the same generic 401; the concrete reason is only
/// logged.
pub async fn authenticate(
    jwt: &JwtService,
    store: &dyn PrincipalStore,
    token: &str,
) -> Result<Principal, AppError> {
    let claims = jwt.verify(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string());
        AppError::unauthorized()
    })?;

    match store.find_principal(claims.sub).await {
        Ok(Some(principal)) => Ok(principal),
        Ok(None) => {
            security_log!("WARN", "auth_subject_gone", user_id = claims.sub.to_string());
            Err(AppError::unauthorized())
        }
        Err(e) => {
            tracing::error!(error = %e, "Principal lookup failed");
            Err(AppError::internal("Authentication lookup failed"))
        }
    }
}

/// Require a valid `Authorization: Bearer <token>`.
///
/// Inserts the resolved [`Principal`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match header {
        Some(header) => match bearer_token(header) {
            Some(token) => token,
            None => {
                security_log!("WARN", "auth_malformed", uri = req.uri().to_string());
                return Err(AppError::unauthorized());
            }
        },
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::unauthorized());
        }
    };

    let principal = authenticate(&state.jwt, state.principals.as_ref(), token).await?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Per-route gate driven by the policy table.
///
/// Runs after [`require_auth`] and before the handler: role membership
/// first, then the route's ownership mode. Attach with `route_layer` so the
/// path parameters are available.
///
/// ```ignore
/// Router::new().route(
///     "/{id}",
///     get(handler::get).route_layer(middleware::from_fn(require_route(Route::EmployeeGet))),
/// )
/// ```
pub fn require_route(
    route: Route,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |mut req: Request, next: Next| {
        Box::pin(async move {
            let policy = route.policy();
            let principal = req
                .extensions()
                .get::<Principal>()
                .cloned()
                .ok_or_else(AppError::unauthorized)?;

            if let Err(e) = policy::authorize(&principal, policy.roles) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = principal.id.to_string(),
                    role = principal.role.as_str(),
                    route = format!("{route:?}")
                );
                return Err(e);
            }

            match policy.ownership {
                Ownership::PathOwner => {
                    let owner = path_param(&mut req, "id")
                        .await
                        .and_then(|id| Uuid::parse_str(&id).ok());
                    if let Err(e) = policy::scope_to_owner(&principal, owner) {
                        security_log!(
                            "WARN",
                            "ownership_denied",
                            user_id = principal.id.to_string(),
                            route = format!("{route:?}")
                        );
                        return Err(e);
                    }
                }
                Ownership::SelfService => {
                    policy::own_employee(&principal)?;
                }
                Ownership::Unscoped | Ownership::Visible(_) => {}
            }

            Ok(next.run(req).await)
        })
    }
}

async fn path_param(req: &mut Request, name: &str) -> Option<String> {
    let params = req.extract_parts::<RawPathParams>().await.ok()?;
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
