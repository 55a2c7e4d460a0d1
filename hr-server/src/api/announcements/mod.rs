//! Announcement API

mod handler;

use axum::Router;
use axum::routing::{delete, get, post};

use super::{gated, gated_audited};
use crate::audit::AuditAction;
use crate::auth::{ResourceType, Route};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/announcements",
            gated(get(handler::list), Route::AnnouncementList).merge(gated_audited(
                state,
                post(handler::create),
                Route::AnnouncementCreate,
                AuditAction::Create,
                ResourceType::Announcement,
            )),
        )
        .route(
            "/announcements/{id}",
            gated_audited(
                state,
                delete(handler::delete),
                Route::AnnouncementDelete,
                AuditAction::Delete,
                ResourceType::Announcement,
            ),
        )
}
