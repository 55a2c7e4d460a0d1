//! Support ticket API

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
            "/tickets",
            gated(get(handler::list), Route::TicketList)
                .merge(gated(post(handler::create), Route::TicketCreate)),
        )
        .route(
            "/tickets/{id}/status",
            gated_audited(
                state,
                patch(handler::set_status),
                Route::TicketStatus,
                AuditAction::StatusChange,
                ResourceType::Ticket,
            ),
        )
}
