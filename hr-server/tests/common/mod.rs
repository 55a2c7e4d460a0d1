//! Test harness: in-memory stores behind the real state and routers

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, Response, header};
use http_body_util::BodyExt;
use hr_server::audit::{AuditEntry, AuditStore, AuditWorker};
use hr_server::auth::{JwtService, Principal, PrincipalStore};
use hr_server::email::LogMailer;
use hr_server::{AppState, BoxError, Config};
use shared::Role;
use sqlx::postgres::PgPoolOptions;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret";

#[derive(Default)]
pub struct MemoryPrincipals {
    principals: Mutex<HashMap<Uuid, Principal>>,
}

impl MemoryPrincipals {
    pub fn insert(&self, principal: Principal) {
        self.principals
            .lock()
            .unwrap()
            .insert(principal.id, principal);
    }

    pub fn remove(&self, id: Uuid) {
        self.principals.lock().unwrap().remove(&id);
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipals {
    async fn find_principal(&self, id: Uuid) -> Result<Option<Principal>, BoxError> {
        Ok(self.principals.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryAudit {
    entries: Mutex<Vec<AuditEntry>>,
}

#[async_trait]
impl AuditStore for MemoryAudit {
    async fn insert(&self, entry: &AuditEntry) -> Result<(), BoxError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

pub fn config(audit_queue_capacity: usize) -> Config {
    Config {
        database_url: "postgres://localhost:1/unused".into(),
        http_port: 0,
        environment: "test".into(),
        jwt_secret: SECRET.into(),
        jwt_expiration_minutes: 60,
        frontend_url: "http://localhost:3000".into(),
        audit_queue_capacity,
        trust_proxy: false,
    }
}

pub fn principal(role: Role, employee_id: Option<Uuid>) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", role.as_str().to_lowercase()),
        role,
        employee_id,
    }
}

/// Router plus the stores and audit worker behind it
pub struct TestApp {
    pub router: Router,
    pub principals: Arc<MemoryPrincipals>,
    pub audit: Arc<MemoryAudit>,
    jwt: Arc<JwtService>,
    worker: JoinHandle<()>,
}

impl TestApp {
    /// The full application router
    pub fn new() -> Self {
        Self::with_router(1024, hr_server::api::create_router)
    }

    /// A custom router over the same state wiring
    pub fn with_router(audit_capacity: usize, build: impl FnOnce(AppState) -> Router) -> Self {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .expect("lazy pool");
        let principals = Arc::new(MemoryPrincipals::default());
        let audit = Arc::new(MemoryAudit::default());

        let (state, worker): (AppState, AuditWorker) = AppState::new(
            pool,
            JwtService::new(SECRET, chrono::Duration::minutes(60)),
            principals.clone(),
            audit.clone(),
            Arc::new(LogMailer),
            &config(audit_capacity),
        );
        let jwt = state.jwt.clone();

        Self {
            router: build(state),
            principals,
            audit,
            jwt,
            worker: tokio::spawn(worker.run()),
        }
    }

    /// Register `principal` and return a bearer header value for it
    pub fn login(&self, principal: &Principal) -> String {
        self.principals.insert(principal.clone());
        self.bearer(principal)
    }

    /// Bearer header value without registering the principal
    pub fn bearer(&self, principal: &Principal) -> String {
        let token = self
            .jwt
            .issue(principal.id, &principal.email, principal.role)
            .expect("token");
        format!("Bearer {token}")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.expect("infallible")
    }

    /// Drop the router, let the worker drain, and return what was written
    pub async fn finish(self) -> Vec<AuditEntry> {
        let Self {
            router,
            audit,
            worker,
            ..
        } = self;
        drop(router);
        tokio::time::timeout(Duration::from_secs(5), worker)
            .await
            .expect("audit worker did not drain")
            .expect("audit worker panicked");
        let entries = audit.entries.lock().unwrap().clone();
        entries
    }
}

pub fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}
