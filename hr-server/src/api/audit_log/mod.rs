//! Audit log API (read-only)

mod handler;

use axum::Router;
use axum::routing::get;

use super::gated;
use crate::auth::Route;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/audit-logs", gated(get(handler::list), Route::AuditLogList))
}
