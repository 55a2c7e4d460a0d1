//! Leave handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{LeaveStatus, LeaveType};
use shared::{AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::{OwnEmployee, Principal, ResourceType, visibility_filter};
use crate::db;
use crate::db::leaves::{Decision, Leave, LeaveEntry, LeaveFilter, NewLeave};
use crate::error::{ApiResult, ServiceError};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct LeaveQuery {
    pub status: Option<String>,
    pub employee_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionRequest {
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Clamp requested page/limit; page is 1-based
    fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            total: 0,
            total_pages: 0,
        }
    }

    fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    fn with_total(mut self, total: i64) -> Self {
        self.total = total;
        self.total_pages = (total + self.limit - 1) / self.limit;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct LeavePage {
    pub data: Vec<LeaveEntry>,
    pub pagination: Pagination,
}

fn validate(req: &NewLeave) -> Result<(), AppError> {
    if req.end_date < req.start_date {
        return Err(AppError::validation("end_date must not be before start_date"));
    }
    let has_document = req.document_url.as_deref().is_some_and(|u| !u.trim().is_empty());
    if req.leave_type == LeaveType::Medical && !has_document {
        return Err(AppError::new(ErrorCode::MedicalDocumentRequired));
    }
    Ok(())
}

/// POST /api/leaves
pub async fn apply(
    State(state): State<AppState>,
    OwnEmployee(employee_id): OwnEmployee,
    Json(req): Json<NewLeave>,
) -> Result<(StatusCode, Json<Leave>), ServiceError> {
    validate(&req)?;
    let leave = db::leaves::create(&state.pool, employee_id, &req).await?;
    Ok((StatusCode::CREATED, Json(leave)))
}

/// GET /api/leaves
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(q): Query<LeaveQuery>,
) -> ApiResult<LeavePage> {
    let status = q
        .status
        .as_deref()
        .map(str::parse::<LeaveStatus>)
        .transpose()
        .map_err(|_| AppError::new(ErrorCode::InvalidStatus))?;

    let scope = visibility_filter(&principal, ResourceType::Leave).narrow(q.employee_id);
    let pagination = Pagination::new(q.page, q.limit);
    let (data, total) = db::leaves::list(
        &state.pool,
        scope,
        &LeaveFilter { status },
        pagination.limit,
        pagination.offset(),
    )
    .await?;

    Ok(Json(LeavePage {
        data,
        pagination: pagination.with_total(total),
    }))
}

/// PATCH /api/leaves/{id}/approve
pub async fn approve(
    state: State<AppState>,
    principal: Principal,
    id: Path<Uuid>,
    body: Option<Json<DecisionRequest>>,
) -> ApiResult<Leave> {
    decide(state, principal, id, body, LeaveStatus::Approved).await
}

/// PATCH /api/leaves/{id}/reject
pub async fn reject(
    state: State<AppState>,
    principal: Principal,
    id: Path<Uuid>,
    body: Option<Json<DecisionRequest>>,
) -> ApiResult<Leave> {
    decide(state, principal, id, body, LeaveStatus::Rejected).await
}

async fn decide(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    body: Option<Json<DecisionRequest>>,
    status: LeaveStatus,
) -> ApiResult<Leave> {
    let comments = body.and_then(|Json(b)| b.comments);

    let leave = match db::leaves::decide(&state.pool, id, status, principal.id, comments.as_deref())
        .await?
    {
        Decision::Decided(leave) => leave,
        Decision::AlreadyDecided => return Err(AppError::new(ErrorCode::LeaveAlreadyDecided).into()),
        Decision::NotFound => return Err(AppError::new(ErrorCode::LeaveNotFound).into()),
    };

    notify_decision(&state, &leave, status, comments).await;
    Ok(Json(leave))
}

/// Best effort; a failed notification never fails the decision
async fn notify_decision(state: &AppState, leave: &Leave, status: LeaveStatus, comments: Option<String>) {
    let email = match db::employees::account_email(&state.pool, leave.employee_id).await {
        Ok(Some(email)) => email,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!(error = %e, "Leave decision recipient lookup failed");
            return;
        }
    };

    if let Err(e) = state
        .mailer
        .send_leave_decision(&email, &leave.leave_type, status.as_str(), comments.as_deref())
        .await
    {
        tracing::warn!(error = %e, leave_id = %leave.id, "Leave decision notification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(leave_type: LeaveType, document_url: Option<&str>) -> NewLeave {
        NewLeave {
            leave_type,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            reason: None,
            document_url: document_url.map(str::to_string),
        }
    }

    #[test]
    fn test_medical_leave_requires_document() {
        let err = validate(&request(LeaveType::Medical, None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::MedicalDocumentRequired);
        assert!(validate(&request(LeaveType::Medical, Some(" "))).is_err());
        assert!(validate(&request(LeaveType::Medical, Some("data:application/pdf;base64,AA"))).is_ok());
        assert!(validate(&request(LeaveType::Annual, None)).is_ok());
    }

    #[test]
    fn test_dates_must_be_ordered() {
        let mut req = request(LeaveType::Annual, None);
        std::mem::swap(&mut req.start_date, &mut req.end_date);
        assert!(validate(&req).is_err());
    }

    #[test]
    fn test_pagination_defaults_and_clamps() {
        let p = Pagination::new(None, None);
        assert_eq!((p.page, p.limit, p.offset()), (1, DEFAULT_PAGE_SIZE, 0));

        let p = Pagination::new(Some(0), Some(10_000));
        assert_eq!((p.page, p.limit), (1, MAX_PAGE_SIZE));

        let p = Pagination::new(Some(3), Some(20)).with_total(41);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.total_pages, 3);
    }
}
