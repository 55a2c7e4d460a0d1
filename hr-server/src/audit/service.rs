//! Audit service
//!
//! Holds the sending side of the bounded audit queue. Recording never
//! awaits the store: a full queue hands the entry to a detached task.

use std::sync::Arc;

use http::StatusCode;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::types::{AuditAction, AuditEntry, RequestSnapshot};
use crate::auth::{Principal, ResourceType};

pub struct AuditService {
    tx: mpsc::Sender<AuditEntry>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("capacity", &self.tx.capacity())
            .finish_non_exhaustive()
    }
}

impl AuditService {
    /// Create the service and the receiver its worker drains
    pub fn new(buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditEntry>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        (Arc::new(Self { tx }), rx)
    }

    /// Queue one audit entry when `status` is 2xx; otherwise do nothing.
    ///
    /// Returns whether an entry was queued.
    pub fn record_if_successful(
        &self,
        principal: Option<&Principal>,
        action: AuditAction,
        resource: ResourceType,
        target_id: Option<String>,
        snapshot: RequestSnapshot,
        status: StatusCode,
    ) -> bool {
        if !status.is_success() {
            return false;
        }

        let entry = AuditEntry {
            principal_id: principal.map(|p| p.id),
            action,
            resource,
            target_id,
            details: snapshot.into_details(),
            created_at: chrono::Utc::now(),
        };
        self.enqueue(entry);
        true
    }

    fn enqueue(&self, entry: AuditEntry) {
        match self.tx.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                // Detached: outlives the request and its client connection.
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let (action, resource) = (entry.action, entry.resource);
                    if tx.send(entry).await.is_err() {
                        tracing::error!(
                            action = %action,
                            resource = %resource,
                            "Audit write failed: queue closed"
                        );
                    }
                });
            }
            Err(TrySendError::Closed(entry)) => {
                tracing::error!(
                    action = %entry.action,
                    resource = %entry.resource,
                    "Audit write failed: queue closed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use shared::Role;
    use uuid::Uuid;

    fn snapshot() -> RequestSnapshot {
        RequestSnapshot {
            method: "PATCH".into(),
            path: "/api/salary/s9/status".into(),
            body: serde_json::json!({ "status": "Paid" }),
            params: Map::new(),
        }
    }

    fn finance() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "finance@example.com".into(),
            role: Role::Finance,
            employee_id: None,
        }
    }

    #[tokio::test]
    async fn test_success_status_queues_one_entry() {
        let (service, mut rx) = AuditService::new(8);
        let principal = finance();

        let queued = service.record_if_successful(
            Some(&principal),
            AuditAction::StatusChange,
            ResourceType::Salary,
            Some("s9".into()),
            snapshot(),
            StatusCode::OK,
        );
        assert!(queued);

        let entry = rx.recv().await.unwrap();
        assert_eq!(entry.principal_id, Some(principal.id));
        assert_eq!(entry.action, AuditAction::StatusChange);
        assert_eq!(entry.resource, ResourceType::Salary);
        assert_eq!(entry.target_id.as_deref(), Some("s9"));
        assert_eq!(entry.details["body"]["status"], "Paid");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_non_success_status_queues_nothing() {
        let (service, mut rx) = AuditService::new(8);
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::BAD_REQUEST,
            StatusCode::FORBIDDEN,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::PERMANENT_REDIRECT,
        ] {
            assert!(!service.record_if_successful(
                Some(&finance()),
                AuditAction::StatusChange,
                ResourceType::Salary,
                None,
                snapshot(),
                status,
            ));
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_full_queue_does_not_block_or_drop() {
        let (service, mut rx) = AuditService::new(1);
        for _ in 0..3 {
            service.record_if_successful(
                None,
                AuditAction::Create,
                ResourceType::Announcement,
                None,
                snapshot(),
                StatusCode::CREATED,
            );
        }

        let mut received = 0;
        while received < 3 {
            let entry = rx.recv().await.unwrap();
            assert_eq!(entry.details["method"], Value::from("PATCH"));
            received += 1;
        }
    }

    #[tokio::test]
    async fn test_closed_queue_is_swallowed() {
        let (service, rx) = AuditService::new(1);
        drop(rx);
        // Logged, not propagated
        assert!(service.record_if_successful(
            None,
            AuditAction::Delete,
            ResourceType::Document,
            None,
            snapshot(),
            StatusCode::OK,
        ));
    }
}
