//! Audit trail for mutating actions
//!
//! ```text
//! audited(action, resource) layer
//!   └─ 2xx? ─► AuditService::record_if_successful ─► mpsc ─► AuditWorker ─► AuditStore
//! ```
//!
//! The request never waits on, or fails because of, the audit write. An
//! entry exists only for an action that returned 2xx; a failed write leaves
//! a gap that is logged, never a phantom entry.

pub mod layer;
pub mod service;
pub mod storage;
pub mod types;
pub mod worker;

pub use layer::audited;
pub use service::AuditService;
pub use storage::{AuditStore, PgAuditStore};
pub use types::{AuditAction, AuditEntry, AuditLogRow, AuditQuery, RequestSnapshot};
pub use worker::AuditWorker;
