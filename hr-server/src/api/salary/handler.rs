//! Payroll handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::SalaryStatus;
use shared::{AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::{Principal, ResourceType, visibility_filter};
use crate::db;
use crate::db::salary::{NewSalary, Payslip, Salary, SalaryFilter};
use crate::error::{ApiResult, ServiceError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

fn not_found() -> AppError {
    AppError::new(ErrorCode::SalaryNotFound)
}

/// POST /api/salary
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewSalary>,
) -> Result<(StatusCode, Json<Salary>), ServiceError> {
    if req.period.trim().is_empty() {
        return Err(AppError::required("period").into());
    }
    if req.basic_salary < Decimal::ZERO {
        return Err(AppError::validation("basic_salary must not be negative").into());
    }

    let net = db::salary::net_salary(req.basic_salary, &req.allowances, &req.deductions)
        .ok_or_else(|| AppError::validation("Salary amounts exceed the supported range"))?;

    let salary = db::salary::create(&state.pool, &req, net).await?;
    Ok((StatusCode::CREATED, Json(salary)))
}

/// GET /api/salary
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<SalaryFilter>,
) -> ApiResult<Vec<Payslip>> {
    let scope = visibility_filter(&principal, ResourceType::Salary).narrow(filter.employee_id);
    let rows = db::salary::list(&state.pool, scope, &filter).await?;
    Ok(Json(rows))
}

/// GET /api/salary/{id}
///
/// A payslip outside the caller's visibility is reported as not found.
pub async fn get_by_id(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Payslip> {
    let scope = visibility_filter(&principal, ResourceType::Salary);
    let payslip = db::salary::find_visible(&state.pool, id, scope)
        .await?
        .filter(|p| scope.permits(p.salary.employee_id))
        .ok_or_else(not_found)?;
    Ok(Json(payslip))
}

/// PATCH /api/salary/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> ApiResult<Salary> {
    let status: SalaryStatus = req
        .status
        .parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidStatus))?;

    let salary = db::salary::set_status(&state.pool, id, status)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(salary))
}
