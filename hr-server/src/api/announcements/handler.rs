//! Announcement handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::{ApiResponse, AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::Principal;
use crate::db;
use crate::db::announcements::{Announcement, AnnouncementEntry};
use crate::error::{ApiResult, ServiceError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub content: String,
}

/// POST /api/announcements
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<Announcement>), ServiceError> {
    if req.title.trim().is_empty() {
        return Err(AppError::required("title").into());
    }
    if req.content.trim().is_empty() {
        return Err(AppError::required("content").into());
    }

    let announcement =
        db::announcements::create(&state.pool, &req.title, &req.content, principal.id).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// GET /api/announcements
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<AnnouncementEntry>> {
    Ok(Json(db::announcements::list(&state.pool).await?))
}

/// DELETE /api/announcements/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<ApiResponse> {
    if !db::announcements::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::AnnouncementNotFound).into());
    }
    Ok(Json(ApiResponse::message("Announcement deleted successfully")))
}
