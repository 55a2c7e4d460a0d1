//! Employee API
//!
//! `GET /employees/{id}` checks the path id against the caller's own
//! profile before any lookup, so a non-elevated caller asking for someone
//! else gets 403 whether or not that employee exists.

mod handler;

use axum::Router;
use axum::routing::{get, patch, put};

use super::{gated, gated_audited};
use crate::audit::AuditAction;
use crate::auth::{ResourceType, Route};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/employees", gated(get(handler::list), Route::EmployeeList))
        .route(
            "/employees/{id}",
            gated(get(handler::get_by_id), Route::EmployeeGet).merge(gated_audited(
                state,
                put(handler::update),
                Route::EmployeeUpdate,
                AuditAction::Update,
                ResourceType::Employee,
            )),
        )
        .route(
            "/employees/{id}/status",
            gated_audited(
                state,
                patch(handler::set_status),
                Route::EmployeeStatus,
                AuditAction::StatusChange,
                ResourceType::Employee,
            ),
        )
}
