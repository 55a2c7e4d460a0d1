//! Self-service password recovery
//!
//! `forgot-password` answers identically for known and unknown emails:
//! lookup, token issuance and the notification run in a detached task.

mod handler;

use axum::routing::post;
use axum::{Router, middleware};

use crate::auth::rate_limit::forgot_password_rate_limit;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/password/forgot-password",
            post(handler::forgot_password).route_layer(middleware::from_fn_with_state(
                state.clone(),
                forgot_password_rate_limit,
            )),
        )
        .route("/password/reset-password", post(handler::reset_password))
}
