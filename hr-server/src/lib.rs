//! hr-server: HR and payroll administration API
//!
//! Employee records, attendance, leave, payroll, documents, announcements
//! and support tickets behind a fixed role hierarchy
//! (Director, Admin, HR, Finance, Employee).
//!
//! # Request pipeline
//!
//! ```text
//! request ─► require_auth (token → Principal, re-fetched from the store)
//!         ─► require_route(Route) (role set + ownership mode from the policy table)
//!         ─► audited(action, resource) (mutating routes only)
//!         ─► handler (visibility predicate on listing queries)
//!         ─► audited: 2xx? → AuditService queue → AuditWorker → audit_logs
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod logger;
pub mod state;
pub mod util;

pub use config::Config;
pub use error::{ApiResult, ServiceError};
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
