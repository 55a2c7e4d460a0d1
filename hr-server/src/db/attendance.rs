//! Daily attendance records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::OwnerScope;

/// Maximum rows returned by one attendance listing
pub const LIST_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

/// Attendance row with the employee's name and code
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AttendanceEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub employee_id: Option<Uuid>,
}

/// Open a check-in for `date`; `None` if one already exists
pub async fn check_in(
    pool: &PgPool,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO attendance (employee_id, date, check_in) VALUES ($1, $2, now())
         ON CONFLICT (employee_id, date) DO NOTHING
         RETURNING id, employee_id, date, check_in, check_out",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await
}

/// Close the open check-in for `date`; `None` if there is none
pub async fn check_out(
    pool: &PgPool,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE attendance SET check_out = now()
         WHERE employee_id = $1 AND date = $2 AND check_out IS NULL
         RETURNING id, employee_id, date, check_in, check_out",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await
}

pub async fn find_for_day(
    pool: &PgPool,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, employee_id, date, check_in, check_out
         FROM attendance WHERE employee_id = $1 AND date = $2",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    scope: OwnerScope,
    filter: &AttendanceFilter,
) -> Result<Vec<AttendanceEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT a.id, a.employee_id, a.date, a.check_in, a.check_out,
                e.full_name, e.employee_id AS emp_code
         FROM attendance a LEFT JOIN employees e ON a.employee_id = e.id
         WHERE TRUE",
    );
    scope.push_predicate(&mut qb, "a.employee_id");
    if let Some(start) = filter.start_date {
        qb.push(" AND a.date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND a.date <= ").push_bind(end);
    }
    qb.push(" ORDER BY a.date DESC, a.check_in DESC LIMIT ")
        .push_bind(LIST_LIMIT);

    qb.build_query_as().fetch_all(pool).await
}
