//! Post-handler audit layer
//!
//! Wrap a mutating route with `audited(action, resource)`; the handler
//! itself never calls the audit service.
//!
//! ```ignore
//! .route(
//!     "/{id}/approve",
//!     patch(handler::approve)
//!         .route_layer(middleware::from_fn_with_state(
//!             state.clone(),
//!             audited(AuditAction::Approve, ResourceType::Leave),
//!         ))
//!         .route_layer(middleware::from_fn(require_route(Route::LeaveApprove))),
//! )
//! ```

use std::future::Future;
use std::pin::Pin;

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{FromRequestParts, RawPathParams, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use shared::{AppError, ErrorCode};

use super::types::{AuditAction, RequestSnapshot};
use crate::auth::{Principal, ResourceType};
use crate::state::AppState;

/// Largest request body an audited route accepts
const MAX_AUDITED_BODY: usize = 1024 * 1024;

/// Route parameters tried, in order, as the audit target
const TARGET_PARAMS: [&str; 2] = ["id", "employee_id"];

type AuditFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Audit layer for one mutating route
pub fn audited(
    action: AuditAction,
    resource: ResourceType,
) -> impl Fn(State<AppState>, Request, Next) -> AuditFuture + Clone {
    move |State(state): State<AppState>, req: Request, next: Next| {
        Box::pin(async move {
            let principal = req.extensions().get::<Principal>().cloned();

            let (mut parts, body) = req.into_parts();
            let params = RawPathParams::from_request_parts(&mut parts, &())
                .await
                .map(|raw| {
                    raw.iter()
                        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                        .collect::<Map<String, Value>>()
                })
                .unwrap_or_default();

            let bytes = match to_bytes(body, MAX_AUDITED_BODY).await {
                Ok(bytes) => bytes,
                Err(_) => {
                    return AppError::with_message(ErrorCode::FileTooLarge, "Request body too large")
                        .into_response();
                }
            };

            let snapshot = RequestSnapshot {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                body: body_json(&bytes),
                params,
            };
            let path_target = target_from_params(&snapshot.params);

            let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

            let (target, response) = match path_target {
                Some(target) => (Some(target), response),
                None if response.status().is_success() => target_from_response(response).await,
                None => (None, response),
            };

            state.audit.record_if_successful(
                principal.as_ref(),
                action,
                resource,
                target,
                snapshot,
                response.status(),
            );

            response
        })
    }
}

fn body_json(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

fn target_from_params(params: &Map<String, Value>) -> Option<String> {
    TARGET_PARAMS
        .iter()
        .find_map(|name| params.get(*name).and_then(Value::as_str))
        .map(str::to_string)
}

fn target_from_body(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read `id` from a JSON response body, rebuilding the response afterwards
async fn target_from_response(response: Response) -> (Option<String>, Response) {
    let (parts, body) = response.into_parts();
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            let target = target_from_body(&body_json(&bytes));
            (target, Response::from_parts(parts, Body::from(bytes)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer response body for audit");
            (None, AppError::internal("Failed to read response").into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_target_prefers_id_param() {
        let p = params(&[("employee_id", "e1"), ("id", "x1")]);
        assert_eq!(target_from_params(&p).as_deref(), Some("x1"));
    }

    #[test]
    fn test_target_falls_back_to_employee_id_param() {
        let p = params(&[("employee_id", "e1")]);
        assert_eq!(target_from_params(&p).as_deref(), Some("e1"));
        assert_eq!(target_from_params(&Map::new()), None);
    }

    #[test]
    fn test_target_from_body() {
        assert_eq!(
            target_from_body(&serde_json::json!({ "id": "s1", "net_salary": 10 })).as_deref(),
            Some("s1")
        );
        assert_eq!(
            target_from_body(&serde_json::json!({ "id": 42 })).as_deref(),
            Some("42")
        );
        assert_eq!(target_from_body(&serde_json::json!([{ "id": "s1" }])), None);
        assert_eq!(target_from_body(&Value::Null), None);
    }

    #[test]
    fn test_non_json_body_is_null() {
        assert_eq!(body_json(&Bytes::from_static(b"")), Value::Null);
        assert_eq!(body_json(&Bytes::from_static(b"not json")), Value::Null);
        assert_eq!(
            body_json(&Bytes::from_static(br#"{"status":"Paid"}"#))["status"],
            "Paid"
        );
    }
}
