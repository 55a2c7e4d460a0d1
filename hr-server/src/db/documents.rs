//! Employee documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::OwnerScope;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub file_type: Option<String>,
    pub category: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DocumentEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub document: Document,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentFilter {
    pub category: Option<String>,
    pub employee_id: Option<Uuid>,
}

pub struct NewDocument<'a> {
    pub file_url: &'a str,
    pub file_name: &'a str,
    pub file_type: Option<&'a str>,
    pub category: &'a str,
}

pub async fn create(
    pool: &PgPool,
    employee_id: Uuid,
    doc: &NewDocument<'_>,
) -> Result<Document, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO documents (employee_id, file_url, file_name, file_type, category)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(employee_id)
    .bind(doc.file_url)
    .bind(doc.file_name)
    .bind(doc.file_type)
    .bind(doc.category)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    scope: OwnerScope,
    filter: &DocumentFilter,
) -> Result<Vec<DocumentEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT d.*, e.full_name, e.employee_id AS emp_code
         FROM documents d LEFT JOIN employees e ON d.employee_id = e.id
         WHERE TRUE",
    );
    scope.push_predicate(&mut qb, "d.employee_id");
    if let Some(category) = &filter.category {
        qb.push(" AND d.category = ").push_bind(category.clone());
    }
    qb.push(" ORDER BY d.uploaded_at DESC");

    qb.build_query_as().fetch_all(pool).await
}

/// Returns false when no such document exists
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM documents WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
