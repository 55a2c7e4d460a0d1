//! Aggregate HR reports

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<String>,
}

/// Per-employee attendance totals
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AttendanceSummary {
    pub employee_id: Uuid,
    pub full_name: String,
    pub emp_code: String,
    pub department: Option<String>,
    pub days_present: i64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeaveLine {
    pub id: Uuid,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: String,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
    pub department: Option<String>,
    pub days_count: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Headcount {
    pub department: String,
    pub status: String,
    pub headcount: i64,
}

pub async fn attendance(pool: &PgPool, range: &ReportRange) -> Result<Vec<AttendanceSummary>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT e.id AS employee_id, e.full_name, e.employee_id AS emp_code, e.department,
                COUNT(DISTINCT a.date) AS days_present,
                COALESCE(SUM(EXTRACT(EPOCH FROM (a.check_out - a.check_in)) / 3600), 0)::float8 AS total_hours
         FROM attendance a JOIN employees e ON a.employee_id = e.id
         WHERE TRUE",
    );
    if let Some(start) = range.start_date {
        qb.push(" AND a.date >= ").push_bind(start);
    }
    if let Some(end) = range.end_date {
        qb.push(" AND a.date <= ").push_bind(end);
    }
    push_department(&mut qb, range);
    qb.push(" GROUP BY e.id ORDER BY e.full_name");

    qb.build_query_as().fetch_all(pool).await
}

pub async fn leaves(pool: &PgPool, range: &ReportRange) -> Result<Vec<LeaveLine>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT l.id, l.leave_type, l.start_date, l.end_date, l.reason, l.status,
                e.full_name, e.employee_id AS emp_code, e.department,
                (l.end_date - l.start_date + 1)::int4 AS days_count
         FROM leaves l LEFT JOIN employees e ON l.employee_id = e.id
         WHERE TRUE",
    );
    if let Some(start) = range.start_date {
        qb.push(" AND l.start_date >= ").push_bind(start);
    }
    if let Some(end) = range.end_date {
        qb.push(" AND l.end_date <= ").push_bind(end);
    }
    push_department(&mut qb, range);
    qb.push(" ORDER BY l.created_at DESC");

    qb.build_query_as().fetch_all(pool).await
}

/// Headcount by department and status
pub async fn employees(pool: &PgPool) -> Result<Vec<Headcount>, sqlx::Error> {
    sqlx::query_as(
        "SELECT COALESCE(department, 'Unassigned') AS department, status, COUNT(*) AS headcount
         FROM employees
         GROUP BY 1, 2
         ORDER BY 1, 2",
    )
    .fetch_all(pool)
    .await
}

fn push_department(qb: &mut QueryBuilder<'_, Postgres>, range: &ReportRange) {
    if let Some(department) = &range.department {
        qb.push(" AND e.department = ").push_bind(department.clone());
    }
}
