//! Document API

mod handler;

use axum::Router;
use axum::routing::{delete, get, post};

use super::{gated, gated_audited};
use crate::audit::AuditAction;
use crate::auth::{ResourceType, Route};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/documents", gated(get(handler::list), Route::DocumentList))
        .route(
            "/documents/upload",
            gated(post(handler::upload), Route::DocumentUpload),
        )
        .route(
            "/documents/{id}",
            gated_audited(
                state,
                delete(handler::delete),
                Route::DocumentDelete,
                AuditAction::Delete,
                ResourceType::Document,
            ),
        )
}
