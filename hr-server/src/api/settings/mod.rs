//! Company settings API

mod handler;

use axum::Router;
use axum::routing::{get, post};

use super::{gated, gated_audited};
use crate::audit::AuditAction;
use crate::auth::{ResourceType, Route};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            gated(get(handler::all), Route::SettingsAll).merge(gated_audited(
                state,
                axum::routing::put(handler::update),
                Route::SettingsUpdate,
                AuditAction::Update,
                ResourceType::Setting,
            )),
        )
        .route(
            "/settings/initialize",
            gated_audited(
                state,
                post(handler::initialize),
                Route::SettingsInitialize,
                AuditAction::Create,
                ResourceType::Setting,
            ),
        )
        .route(
            "/settings/{category}",
            gated(get(handler::by_category), Route::SettingsByCategory),
        )
}
