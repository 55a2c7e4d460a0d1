//! User accounts and credentials

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use shared::Role;
use sqlx::PgPool;
use uuid::Uuid;

use super::employees::Employee;

/// Login lookup row: account joined with its employee profile
#[derive(Debug, sqlx::FromRow)]
pub struct Credentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub employee_id: Option<Uuid>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

/// Current user with profile, as returned by `/auth/me`
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub employee_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
}

/// Employee profile created alongside a new user
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub full_name: String,
    pub employee_code: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
}

pub async fn find_credentials(pool: &PgPool, email: &str) -> Result<Option<Credentials>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.id, u.email, u.password_hash, u.role, e.id AS employee_id, e.full_name
         FROM users u LEFT JOIN employees e ON e.user_id = u.id
         WHERE u.email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_id_by_email(pool: &PgPool, email: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_profile(pool: &PgPool, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.id, u.email, u.role, e.id AS employee_id, e.full_name,
                e.employee_id AS emp_code, e.department, e.phone, e.status
         FROM users u LEFT JOIN employees e ON e.user_id = u.id
         WHERE u.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Create a user and, when given, its employee profile in one transaction
pub async fn create(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    role: Role,
    profile: Option<&NewProfile>,
) -> Result<(UserSummary, Option<Employee>), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let user: UserSummary = sqlx::query_as(
        "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3)
         RETURNING id, email, role",
    )
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(&mut *tx)
    .await?;

    let employee = match profile {
        Some(p) => Some(
            sqlx::query_as::<_, Employee>(
                "INSERT INTO employees (user_id, full_name, employee_id, department, phone, join_date)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING *, $7::text AS email, $8::text AS user_role",
            )
            .bind(user.id)
            .bind(&p.full_name)
            .bind(&p.employee_code)
            .bind(p.department.as_deref())
            .bind(p.phone.as_deref())
            .bind(p.join_date)
            .bind(&user.email)
            .bind(&user.role)
            .fetch_one(&mut *tx)
            .await?,
        ),
        None => None,
    };

    tx.commit().await?;
    Ok((user, employee))
}

pub async fn set_reset_token(
    pool: &PgPool,
    user_id: Uuid,
    digest: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET reset_token = $1, reset_token_expiry = $2 WHERE id = $3")
        .bind(digest)
        .bind(expires_at)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// User holding an unexpired reset token with this digest
pub async fn find_by_reset_token(pool: &PgPool, digest: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE reset_token = $1 AND reset_token_expiry > now()")
        .bind(digest)
        .fetch_optional(pool)
        .await
}

/// Set a new password hash and drop any pending reset token
pub async fn update_password(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<Option<UserSummary>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE users SET password_hash = $1, reset_token = NULL, reset_token_expiry = NULL
         WHERE id = $2
         RETURNING id, email, role",
    )
    .bind(password_hash)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
