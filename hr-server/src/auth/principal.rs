//! Authenticated caller and its store lookup

use async_trait::async_trait;
use serde::Serialize;
use shared::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::BoxError;

/// The caller of one request.
///
/// Built from the store on every request; never persisted beyond it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    /// Linked employee profile, if any
    pub employee_id: Option<Uuid>,
}

impl Principal {
    /// True only when the caller has a profile and it is `owner`
    pub fn owns(&self, owner: Uuid) -> bool {
        self.employee_id == Some(owner)
    }
}

/// Lookup of the current principal record by id
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_principal(&self, id: Uuid) -> Result<Option<Principal>, BoxError>;
}

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    id: Uuid,
    email: String,
    role: String,
    employee_id: Option<Uuid>,
}

/// PostgreSQL principal store: `users` joined with its employee profile
#[derive(Clone)]
pub struct PgPrincipalStore {
    pool: PgPool,
}

impl PgPrincipalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn find_principal(&self, id: Uuid) -> Result<Option<Principal>, BoxError> {
        let row: Option<PrincipalRow> = sqlx::query_as(
            "SELECT u.id, u.email, u.role, e.id AS employee_id
             FROM users u LEFT JOIN employees e ON e.user_id = u.id
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role = row.role.parse::<Role>()?;
        Ok(Some(Principal {
            id: row.id,
            email: row.email,
            role,
            employee_id: row.employee_id,
        }))
    }
}
