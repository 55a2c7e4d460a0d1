//! Leave requests

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{LeaveStatus, LeaveType};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::OwnerScope;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Leave {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub document_url: Option<String>,
    pub status: String,
    pub approved_by: Option<Uuid>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Leave row with employee name/code and the approver's email
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeaveEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub leave: Leave,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
    pub approver_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLeave {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub status: Option<LeaveStatus>,
}

/// Outcome of deciding a leave request
#[derive(Debug)]
pub enum Decision {
    Decided(Leave),
    AlreadyDecided,
    NotFound,
}

pub async fn create(pool: &PgPool, employee_id: Uuid, data: &NewLeave) -> Result<Leave, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO leaves (employee_id, leave_type, start_date, end_date, reason, document_url)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(employee_id)
    .bind(data.leave_type.as_str())
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.reason.as_deref())
    .bind(data.document_url.as_deref())
    .fetch_one(pool)
    .await
}

fn push_where(qb: &mut QueryBuilder<'_, Postgres>, scope: OwnerScope, filter: &LeaveFilter) {
    qb.push(" WHERE TRUE");
    scope.push_predicate(qb, "l.employee_id");
    if let Some(status) = filter.status {
        qb.push(" AND l.status = ").push_bind(status.as_str());
    }
}

/// One page of leaves, newest first, and the total matching count
pub async fn list(
    pool: &PgPool,
    scope: OwnerScope,
    filter: &LeaveFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<LeaveEntry>, i64), sqlx::Error> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM leaves l");
    push_where(&mut count, scope, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT l.*, e.full_name, e.employee_id AS emp_code, u.email AS approver_email
         FROM leaves l
         LEFT JOIN employees e ON l.employee_id = e.id
         LEFT JOIN users u ON l.approved_by = u.id",
    );
    push_where(&mut qb, scope, filter);
    qb.push(" ORDER BY l.created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = qb.build_query_as().fetch_all(pool).await?;
    Ok((rows, total))
}

/// Move a Pending leave to `status`; decided leaves are left untouched
pub async fn decide(
    pool: &PgPool,
    id: Uuid,
    status: LeaveStatus,
    approver: Uuid,
    comments: Option<&str>,
) -> Result<Decision, sqlx::Error> {
    let decided: Option<Leave> = sqlx::query_as(
        "UPDATE leaves SET status = $1, approved_by = $2, comments = $3
         WHERE id = $4 AND status = 'Pending'
         RETURNING *",
    )
    .bind(status.as_str())
    .bind(approver)
    .bind(comments)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some(leave) = decided {
        return Ok(Decision::Decided(leave));
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM leaves WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(if exists {
        Decision::AlreadyDecided
    } else {
        Decision::NotFound
    })
}
