//! Report handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::db;
use crate::db::reports::{AttendanceSummary, Headcount, LeaveLine, ReportRange};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/reports/attendance
pub async fn attendance(
    State(state): State<AppState>,
    Query(range): Query<ReportRange>,
) -> ApiResult<Vec<AttendanceSummary>> {
    Ok(Json(db::reports::attendance(&state.pool, &range).await?))
}

/// GET /api/reports/leaves
pub async fn leaves(
    State(state): State<AppState>,
    Query(range): Query<ReportRange>,
) -> ApiResult<Vec<LeaveLine>> {
    Ok(Json(db::reports::leaves(&state.pool, &range).await?))
}

/// GET /api/reports/employees
pub async fn employees(State(state): State<AppState>) -> ApiResult<Vec<Headcount>> {
    Ok(Json(db::reports::employees(&state.pool).await?))
}
