//! Employee profiles

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::EmployeeStatus;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::OwnerScope;

const SELECT_EMPLOYEE: &str = "SELECT e.*, u.email, u.role AS user_role
     FROM employees e LEFT JOIN users u ON e.user_id = u.id";

/// Employee row with its account email and role
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    /// Company employee code
    pub employee_id: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub email: Option<String>,
    pub user_role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub status: Option<String>,
    pub employee_id: Option<Uuid>,
}

/// Partial update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub async fn list(
    pool: &PgPool,
    scope: OwnerScope,
    filter: &EmployeeFilter,
) -> Result<Vec<Employee>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_EMPLOYEE);
    qb.push(" WHERE TRUE");
    scope.push_predicate(&mut qb, "e.id");
    if let Some(status) = &filter.status {
        qb.push(" AND e.status = ").push_bind(status.clone());
    }
    if let Some(department) = &filter.department {
        qb.push(" AND e.department = ").push_bind(department.clone());
    }
    qb.push(" ORDER BY e.created_at DESC");

    qb.build_query_as().fetch_all(pool).await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Employee>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_EMPLOYEE);
    qb.push(" WHERE e.id = ").push_bind(id);
    qb.build_query_as().fetch_optional(pool).await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    data: &EmployeeUpdate,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as(
        "WITH e AS (
             UPDATE employees SET
                 full_name = COALESCE($1, full_name),
                 department = COALESCE($2, department),
                 phone = COALESCE($3, phone),
                 join_date = COALESCE($4, join_date),
                 notes = COALESCE($5, notes)
             WHERE id = $6
             RETURNING *
         )
         SELECT e.*, u.email, u.role AS user_role FROM e LEFT JOIN users u ON e.user_id = u.id",
    )
    .bind(data.full_name.as_deref())
    .bind(data.department.as_deref())
    .bind(data.phone.as_deref())
    .bind(data.join_date)
    .bind(data.notes.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_status(
    pool: &PgPool,
    id: Uuid,
    status: EmployeeStatus,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as(
        "WITH e AS (UPDATE employees SET status = $1 WHERE id = $2 RETURNING *)
         SELECT e.*, u.email, u.role AS user_role FROM e LEFT JOIN users u ON e.user_id = u.id",
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Account email of the employee, for notifications
pub async fn account_email(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT u.email FROM employees e JOIN users u ON e.user_id = u.id WHERE e.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
