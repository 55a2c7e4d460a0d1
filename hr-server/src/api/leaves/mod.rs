//! Leave API

mod handler;

use axum::Router;
use axum::routing::{get, patch};

use super::{gated, gated_audited};
use crate::audit::AuditAction;
use crate::auth::{ResourceType, Route};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/leaves",
            gated(get(handler::list), Route::LeaveList).merge(gated(
                axum::routing::post(handler::apply),
                Route::LeaveApply,
            )),
        )
        .route(
            "/leaves/{id}/approve",
            gated_audited(
                state,
                patch(handler::approve),
                Route::LeaveApprove,
                AuditAction::Approve,
                ResourceType::Leave,
            ),
        )
        .route(
            "/leaves/{id}/reject",
            gated_audited(
                state,
                patch(handler::reject),
                Route::LeaveReject,
                AuditAction::Reject,
                ResourceType::Leave,
            ),
        )
}
