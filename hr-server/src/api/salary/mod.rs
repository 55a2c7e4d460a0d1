//! Payroll API

mod handler;

use axum::Router;
use axum::routing::{get, patch, post};

use super::{gated, gated_audited};
use crate::audit::AuditAction;
use crate::auth::{ResourceType, Route};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/salary",
            gated(get(handler::list), Route::SalaryList).merge(gated_audited(
                state,
                post(handler::create),
                Route::SalaryCreate,
                AuditAction::Create,
                ResourceType::Salary,
            )),
        )
        .route("/salary/{id}", gated(get(handler::get_by_id), Route::SalaryGet))
        .route(
            "/salary/{id}/status",
            gated_audited(
                state,
                patch(handler::set_status),
                Route::SalaryStatus,
                AuditAction::StatusChange,
                ResourceType::Salary,
            ),
        )
}
