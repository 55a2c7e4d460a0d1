//! Attendance handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::util::today;
use shared::{AppError, ErrorCode};

use crate::auth::{OwnEmployee, Principal, ResourceType, visibility_filter};
use crate::db;
use crate::db::attendance::{Attendance, AttendanceEntry, AttendanceFilter};
use crate::error::{ApiResult, ServiceError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TodayStatus {
    pub checked_in: bool,
    pub checked_out: bool,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
}

impl From<Option<Attendance>> for TodayStatus {
    fn from(record: Option<Attendance>) -> Self {
        match record {
            Some(a) => Self {
                checked_in: true,
                checked_out: a.check_out.is_some(),
                check_in: Some(a.check_in),
                check_out: a.check_out,
            },
            None => Self {
                checked_in: false,
                checked_out: false,
                check_in: None,
                check_out: None,
            },
        }
    }
}

/// POST /api/attendance/checkin
pub async fn check_in(
    State(state): State<AppState>,
    OwnEmployee(employee_id): OwnEmployee,
) -> Result<(StatusCode, Json<Attendance>), ServiceError> {
    let record = db::attendance::check_in(&state.pool, employee_id, today())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AlreadyCheckedIn))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/attendance/checkout
pub async fn check_out(
    State(state): State<AppState>,
    OwnEmployee(employee_id): OwnEmployee,
) -> ApiResult<Attendance> {
    let record = db::attendance::check_out(&state.pool, employee_id, today())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotCheckedIn))?;
    Ok(Json(record))
}

/// GET /api/attendance/today
pub async fn today_status(
    State(state): State<AppState>,
    OwnEmployee(employee_id): OwnEmployee,
) -> ApiResult<TodayStatus> {
    let record = db::attendance::find_for_day(&state.pool, employee_id, today()).await?;
    Ok(Json(record.into()))
}

/// GET /api/attendance
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<AttendanceFilter>,
) -> ApiResult<Vec<AttendanceEntry>> {
    let scope = visibility_filter(&principal, ResourceType::Attendance).narrow(filter.employee_id);
    let records = db::attendance::list(&state.pool, scope, &filter).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_today_status_shapes() {
        let none = TodayStatus::from(None);
        assert!(!none.checked_in && !none.checked_out);

        let open = TodayStatus::from(Some(Attendance {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            date: today(),
            check_in: Utc::now(),
            check_out: None,
        }));
        assert!(open.checked_in);
        assert!(!open.checked_out);
    }
}
