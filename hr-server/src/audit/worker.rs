//! Audit background worker
//!
//! Drains the audit queue into the store, in queue order. Exits when every
//! `AuditService` handle is dropped.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::storage::AuditStore;
use super::types::AuditEntry;

pub struct AuditWorker {
    store: Arc<dyn AuditStore>,
    rx: mpsc::Receiver<AuditEntry>,
}

impl AuditWorker {
    pub fn new(store: Arc<dyn AuditStore>, rx: mpsc::Receiver<AuditEntry>) -> Self {
        Self { store, rx }
    }

    /// Run until the channel closes
    pub async fn run(mut self) {
        tracing::info!("Audit log worker started");

        while let Some(entry) = self.rx.recv().await {
            match self.store.insert(&entry).await {
                Ok(()) => {
                    tracing::debug!(
                        action = %entry.action,
                        resource = %entry.resource,
                        target = ?entry.target_id,
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    // The business response has already been sent; the trail has a gap.
                    tracing::error!(
                        action = %entry.action,
                        resource = %entry.resource,
                        target = ?entry.target_id,
                        error = %e,
                        "Audit write failed"
                    );
                }
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxError;
    use crate::audit::AuditAction;
    use crate::auth::ResourceType;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FlakyStore {
        written: Mutex<Vec<AuditEntry>>,
    }

    #[async_trait]
    impl AuditStore for FlakyStore {
        async fn insert(&self, entry: &AuditEntry) -> Result<(), BoxError> {
            if entry.target_id.as_deref() == Some("fail") {
                return Err("store unavailable".into());
            }
            self.written.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    fn entry(target: &str) -> AuditEntry {
        AuditEntry {
            principal_id: None,
            action: AuditAction::Delete,
            resource: ResourceType::Announcement,
            target_id: Some(target.to_string()),
            details: serde_json::Value::Null,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_failed_write_does_not_stop_worker() {
        let store = Arc::new(FlakyStore::default());
        let (tx, rx) = mpsc::channel(8);
        let worker = AuditWorker::new(store.clone(), rx);

        tx.send(entry("a1")).await.unwrap();
        tx.send(entry("fail")).await.unwrap();
        tx.send(entry("a2")).await.unwrap();
        drop(tx);

        worker.run().await;

        let written = store.written.lock().unwrap();
        let targets: Vec<_> = written.iter().filter_map(|e| e.target_id.clone()).collect();
        assert_eq!(targets, vec!["a1", "a2"]);
    }
}
