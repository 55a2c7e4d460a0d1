//! Audit log handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::audit::{AuditLogRow, AuditQuery, storage};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/audit-logs
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<Vec<AuditLogRow>> {
    let rows = storage::list(&state.pool, &query).await?;
    Ok(Json(rows))
}
