//! Authentication API
//!
//! Login is public and rate limited. Principal creation and the admin
//! password reset are protected routes whose operations re-check for
//! Admin or Director; they are not audited since their bodies carry a
//! password.

mod handler;

use axum::routing::{get, post};
use axum::{Router, middleware};

use super::gated;
use crate::auth::Route;
use crate::auth::rate_limit::login_rate_limit;
use crate::state::AppState;

pub fn public_router(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/auth/login",
        post(handler::login).route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        )),
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", gated(post(handler::register), Route::Register))
        .route(
            "/auth/admin/reset-password",
            gated(post(handler::admin_reset_password), Route::AdminResetPassword),
        )
        .route("/auth/me", gated(get(handler::me), Route::Me))
}
