//! HTTP API
//!
//! # Layout
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login, principal creation, current user
//! - [`password`] - self-service password recovery
//! - [`employees`], [`attendance`], [`leaves`], [`salary`], [`documents`],
//!   [`announcements`], [`tickets`] - HR records
//! - [`audit_log`], [`reports`], [`settings`] - administration
//!
//! Every protected route is wrapped, outermost first, in `require_auth`,
//! then `require_route(Route::..)`, then (mutating routes) `audited(..)`.

pub mod announcements;
pub mod attendance;
pub mod audit_log;
pub mod auth;
pub mod documents;
pub mod employees;
pub mod health;
pub mod leaves;
pub mod password;
pub mod reports;
pub mod salary;
pub mod settings;
pub mod tickets;

use axum::extract::DefaultBodyLimit;
use axum::routing::{MethodRouter, get};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::audit::{AuditAction, audited};
use crate::auth::{ResourceType, Route, require_auth, require_route};
use crate::state::AppState;

/// Upload ceiling for any request body
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Attach the policy gate for `route`
pub fn gated(method: MethodRouter<AppState>, route: Route) -> MethodRouter<AppState> {
    method.route_layer(middleware::from_fn(require_route(route)))
}

/// Policy gate plus post-response audit for a mutating route
pub fn gated_audited(
    state: &AppState,
    method: MethodRouter<AppState>,
    route: Route,
    action: AuditAction,
    resource: ResourceType,
) -> MethodRouter<AppState> {
    let method = method.route_layer(middleware::from_fn_with_state(
        state.clone(),
        audited(action, resource),
    ));
    gated(method, route)
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .merge(auth::public_router(&state))
        .merge(password::router(&state));

    let protected = Router::new()
        .merge(auth::router())
        .merge(employees::router(&state))
        .merge(attendance::router())
        .merge(leaves::router(&state))
        .merge(salary::router(&state))
        .merge(documents::router(&state))
        .merge(announcements::router(&state))
        .merge(tickets::router(&state))
        .merge(audit_log::router())
        .merge(reports::router())
        .merge(settings::router(&state))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
