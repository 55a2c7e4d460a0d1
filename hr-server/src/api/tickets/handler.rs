//! Support ticket handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::TicketStatus;
use shared::{AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::{OwnEmployee, Principal, ResourceType, visibility_filter};
use crate::db;
use crate::db::tickets::{Ticket, TicketEntry, TicketFilter};
use crate::error::{ApiResult, ServiceError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// POST /api/tickets
pub async fn create(
    State(state): State<AppState>,
    OwnEmployee(employee_id): OwnEmployee,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<Ticket>), ServiceError> {
    if req.subject.trim().is_empty() {
        return Err(AppError::required("subject").into());
    }
    if req.description.trim().is_empty() {
        return Err(AppError::required("description").into());
    }

    let ticket = db::tickets::create(&state.pool, employee_id, &req.subject, &req.description).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/tickets
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<TicketFilter>,
) -> ApiResult<Vec<TicketEntry>> {
    let scope = visibility_filter(&principal, ResourceType::Ticket).narrow(filter.employee_id);
    let rows = db::tickets::list(&state.pool, scope, &filter).await?;
    Ok(Json(rows))
}

/// PATCH /api/tickets/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> ApiResult<Ticket> {
    let status: TicketStatus = req
        .status
        .parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidStatus))?;

    let ticket = db::tickets::set_status(&state.pool, id, status, principal.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TicketNotFound))?;
    Ok(Json(ticket))
}
