//! Server configuration

use crate::BoxError;

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for access tokens
    pub jwt_secret: String,
    /// Access token lifetime (minutes)
    pub jwt_expiration_minutes: i64,
    /// Web client base URL, used to build password reset links
    pub frontend_url: String,
    /// Bounded audit queue size
    pub audit_queue_capacity: usize,
    /// Key rate limits on `X-Forwarded-For`. Only enable behind a proxy that
    /// overwrites the header; otherwise clients can pick their own key.
    pub trust_proxy: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: Self::parse_or("HTTP_PORT", 5000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiration_minutes: Self::parse_or("JWT_EXPIRATION_MINUTES", 1440),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            audit_queue_capacity: Self::parse_or("AUDIT_QUEUE_CAPACITY", 1024),
            trust_proxy: Self::parse_or("TRUST_PROXY", false),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
