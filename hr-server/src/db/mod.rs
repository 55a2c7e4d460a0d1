//! Database access layer
//!
//! Free functions over `&PgPool`, one module per table. Listing functions
//! take an [`OwnerScope`](crate::auth::OwnerScope) and render it into the
//! query; they never decide visibility themselves.

pub mod announcements;
pub mod attendance;
pub mod documents;
pub mod employees;
pub mod leaves;
pub mod reports;
pub mod salary;
pub mod settings;
pub mod tickets;
pub mod users;

/// True when `err` is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
