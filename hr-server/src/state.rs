//! Shared server state

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::BoxError;
use crate::audit::{AuditService, AuditStore, AuditWorker, PgAuditStore};
use crate::auth::rate_limit::RateLimiter;
use crate::auth::{JwtService, PgPrincipalStore, PrincipalStore};
use crate::config::Config;
use crate::email::{LogMailer, Mailer};

/// Cloned into every handler; all fields are cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: Arc<JwtService>,
    pub principals: Arc<dyn PrincipalStore>,
    pub audit: Arc<AuditService>,
    pub mailer: Arc<dyn Mailer>,
    pub rate_limiter: RateLimiter,
    /// Web client base URL for password reset links
    pub frontend_url: Arc<str>,
}

impl AppState {
    /// Assemble state from its parts.
    ///
    /// Returns the audit worker that drains the queue; the caller spawns it.
    pub fn new(
        pool: PgPool,
        jwt: JwtService,
        principals: Arc<dyn PrincipalStore>,
        audit_store: Arc<dyn AuditStore>,
        mailer: Arc<dyn Mailer>,
        config: &Config,
    ) -> (Self, AuditWorker) {
        let (audit, rx) = AuditService::new(config.audit_queue_capacity);
        let worker = AuditWorker::new(audit_store, rx);

        let state = Self {
            pool,
            jwt: Arc::new(jwt),
            principals,
            audit,
            mailer,
            rate_limiter: RateLimiter::new().trusting_proxy(config.trust_proxy),
            frontend_url: config.frontend_url.trim_end_matches('/').into(),
        };
        (state, worker)
    }

    /// Connect to PostgreSQL and wire the production stores
    pub async fn connect(config: &Config) -> Result<(Self, AuditWorker), BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.database_url)
            .await?;
        tracing::info!("Connected to PostgreSQL");

        Ok(Self::new(
            pool.clone(),
            JwtService::from_config(config),
            Arc::new(PgPrincipalStore::new(pool.clone())),
            Arc::new(PgAuditStore::new(pool)),
            Arc::new(LogMailer),
            config,
        ))
    }
}
