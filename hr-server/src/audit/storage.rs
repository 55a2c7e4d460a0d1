//! Audit persistence

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::types::{AuditEntry, AuditLogRow, AuditQuery};
use crate::BoxError;

/// Maximum rows returned by one audit listing
pub const LIST_LIMIT: i64 = 500;

/// Insert-only audit sink
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert(&self, entry: &AuditEntry) -> Result<(), BoxError>;
}

#[derive(Clone)]
pub struct PgAuditStore {
    pool: PgPool,
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn insert(&self, entry: &AuditEntry) -> Result<(), BoxError> {
        sqlx::query(
            "INSERT INTO audit_logs (user_id, action, resource, target_id, details, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.principal_id)
        .bind(entry.action.as_str())
        .bind(entry.resource.as_str())
        .bind(entry.target_id.as_deref())
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Newest-first audit listing with optional filters
pub async fn list(pool: &PgPool, q: &AuditQuery) -> Result<Vec<AuditLogRow>, BoxError> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT a.id, a.user_id, a.action, a.resource, a.target_id, a.details, a.created_at,
                u.email AS user_email, e.full_name AS user_name
         FROM audit_logs a
         LEFT JOIN users u ON a.user_id = u.id
         LEFT JOIN employees e ON e.user_id = u.id
         WHERE TRUE",
    );
    push_filters(&mut qb, q);
    qb.push(" ORDER BY a.created_at DESC LIMIT ").push_bind(LIST_LIMIT);

    let rows = qb.build_query_as::<AuditLogRow>().fetch_all(pool).await?;
    Ok(rows)
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, q: &AuditQuery) {
    if let Some(action) = &q.action {
        qb.push(" AND a.action = ").push_bind(action.clone());
    }
    if let Some(resource) = &q.resource {
        qb.push(" AND a.resource = ").push_bind(resource.clone());
    }
    if let Some(user_id) = q.user_id {
        qb.push(" AND a.user_id = ").push_bind(user_id);
    }
    if let Some(start) = q.start_date {
        qb.push(" AND a.created_at >= ").push_bind(start);
    }
    if let Some(end) = q.end_date {
        // inclusive end date
        qb.push(" AND a.created_at < ")
            .push_bind(end)
            .push(" + INTERVAL '1 day'");
    }
}
