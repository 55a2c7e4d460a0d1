//! Company settings handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use shared::{ApiResponse, AppError};

use crate::auth::Principal;
use crate::db;
use crate::db::settings::SettingsMap;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/settings
pub async fn all(State(state): State<AppState>) -> ApiResult<SettingsMap> {
    let rows = db::settings::all(&state.pool).await?;
    Ok(Json(db::settings::group(rows)))
}

/// GET /api/settings/{category}
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<BTreeMap<String, Value>> {
    Ok(Json(db::settings::by_category(&state.pool, &category).await?))
}

/// PUT /api/settings
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Json(settings): Json<SettingsMap>,
) -> ApiResult<ApiResponse> {
    if settings.values().all(BTreeMap::is_empty) {
        return Err(AppError::validation("No settings provided").into());
    }
    let written = db::settings::upsert(&state.pool, &settings, principal.id).await?;
    tracing::info!(written, updated_by = %principal.id, "Settings updated");
    Ok(Json(ApiResponse::message("Settings updated successfully")))
}

/// POST /api/settings/initialize
pub async fn initialize(State(state): State<AppState>, principal: Principal) -> ApiResult<ApiResponse> {
    let inserted = db::settings::initialize_defaults(&state.pool, principal.id).await?;
    tracing::info!(inserted, "Default settings initialized");
    Ok(Json(ApiResponse::message("Default settings initialized successfully")))
}
