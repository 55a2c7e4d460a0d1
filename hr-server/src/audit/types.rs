//! Audit trail types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::auth::ResourceType;

/// Action verb recorded for a mutating route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    StatusChange,
}

impl AuditAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::StatusChange => "STATUS_CHANGE",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request as submitted: method, path, body and route parameters.
///
/// No redaction happens here; routes whose body carries a password are
/// not audited.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSnapshot {
    pub method: String,
    pub path: String,
    pub body: Value,
    pub params: Map<String, Value>,
}

impl RequestSnapshot {
    pub fn into_details(self) -> Value {
        serde_json::json!({
            "method": self.method,
            "path": self.path,
            "body": self.body,
            "params": self.params,
        })
    }
}

/// One audit row, immutable once queued
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    /// Acting principal; None once the user is deleted
    pub principal_id: Option<Uuid>,
    pub action: AuditAction,
    pub resource: ResourceType,
    pub target_id: Option<String>,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

/// Audit log listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub resource: Option<String>,
    pub user_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Audit log row as listed, with the actor's email and name
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuditLogRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub resource: String,
    pub target_id: Option<String>,
    pub details: Value,
    pub created_at: DateTime<Utc>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(AuditAction::StatusChange.as_str(), "STATUS_CHANGE");
        assert_eq!(
            serde_json::to_string(&AuditAction::Approve).unwrap(),
            "\"APPROVE\""
        );
    }

    #[test]
    fn test_snapshot_details_shape() {
        let mut params = Map::new();
        params.insert("id".into(), Value::String("abc".into()));
        let snapshot = RequestSnapshot {
            method: "PATCH".into(),
            path: "/api/leaves/abc/approve".into(),
            body: serde_json::json!({ "comments": "ok" }),
            params,
        };

        let details = snapshot.into_details();
        assert_eq!(details["method"], "PATCH");
        assert_eq!(details["path"], "/api/leaves/abc/approve");
        assert_eq!(details["body"]["comments"], "ok");
        assert_eq!(details["params"]["id"], "abc");
    }
}
