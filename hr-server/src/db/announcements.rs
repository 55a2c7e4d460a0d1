//! Company announcements

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Announcements returned by one listing
pub const LIST_LIMIT: i64 = 50;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AnnouncementEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub announcement: Announcement,
    pub creator_email: Option<String>,
    pub creator_name: Option<String>,
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    content: &str,
    created_by: Uuid,
) -> Result<Announcement, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO announcements (title, content, created_by) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(title)
    .bind(content)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

/// Most recent first
pub async fn list(pool: &PgPool) -> Result<Vec<AnnouncementEntry>, sqlx::Error> {
    sqlx::query_as(
        "SELECT a.*, u.email AS creator_email, e.full_name AS creator_name
         FROM announcements a
         LEFT JOIN users u ON a.created_by = u.id
         LEFT JOIN employees e ON e.user_id = u.id
         ORDER BY a.created_at DESC
         LIMIT $1",
    )
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
