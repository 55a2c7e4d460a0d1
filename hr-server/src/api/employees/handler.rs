//! Employee handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::EmployeeStatus;
use shared::{AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::{Principal, ResourceType, visibility_filter};
use crate::db;
use crate::db::employees::{Employee, EmployeeFilter, EmployeeUpdate};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::EmployeeNotFound)
}

/// GET /api/employees
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<EmployeeFilter>,
) -> ApiResult<Vec<Employee>> {
    let scope = visibility_filter(&principal, ResourceType::Employee).narrow(filter.employee_id);
    let employees = db::employees::list(&state.pool, scope, &filter).await?;
    Ok(Json(employees))
}

/// GET /api/employees/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Employee> {
    let employee = db::employees::find(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(employee))
}

/// PUT /api/employees/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<EmployeeUpdate>,
) -> ApiResult<Employee> {
    let employee = db::employees::update(&state.pool, id, &data)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(employee))
}

/// PATCH /api/employees/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> ApiResult<Employee> {
    let status: EmployeeStatus = req
        .status
        .parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidStatus))?;

    let employee = db::employees::set_status(&state.pool, id, status)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(employee))
}
