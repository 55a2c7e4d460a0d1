//! Support tickets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::TicketStatus;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::OwnerScope;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub resolved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TicketEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub ticket: Ticket,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
    pub resolver_email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub status: Option<String>,
    pub employee_id: Option<Uuid>,
}

pub async fn create(
    pool: &PgPool,
    employee_id: Uuid,
    subject: &str,
    description: &str,
) -> Result<Ticket, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO tickets (employee_id, subject, description) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(employee_id)
    .bind(subject)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    scope: OwnerScope,
    filter: &TicketFilter,
) -> Result<Vec<TicketEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT t.*, e.full_name, e.employee_id AS emp_code, u.email AS resolver_email
         FROM tickets t
         LEFT JOIN employees e ON t.employee_id = e.id
         LEFT JOIN users u ON t.resolved_by = u.id
         WHERE TRUE",
    );
    scope.push_predicate(&mut qb, "t.employee_id");
    if let Some(status) = &filter.status {
        qb.push(" AND t.status = ").push_bind(status.clone());
    }
    qb.push(" ORDER BY t.created_at DESC");

    qb.build_query_as().fetch_all(pool).await
}

pub async fn set_status(
    pool: &PgPool,
    id: Uuid,
    status: TicketStatus,
    resolver: Uuid,
) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE tickets SET status = $1, resolved_by = $2, updated_at = now()
         WHERE id = $3
         RETURNING *",
    )
    .bind(status.as_str())
    .bind(resolver)
    .bind(id)
    .fetch_optional(pool)
    .await
}
