//! HS256 access tokens
//!
//! A token proves only *who* the caller is. Its `role` and `email` claims are
//! informational; the middleware re-reads role and employee link from the
//! principal store on every request.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::Role;
use uuid::Uuid;

use crate::config::Config;

const ISSUER: &str = "hr-server";
const AUDIENCE: &str = "hr-clients";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Why a token was refused. Only ever logged; clients see a generic 401.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("token expired")]
    Expired,
    #[error("signature mismatch")]
    BadSignature,
    #[error("malformed token: {0}")]
    Malformed(jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature => JwtError::BadSignature,
            _ => JwtError::Malformed(e),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl_minutes", &self.ttl.num_minutes())
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);
        validation.set_required_spec_claims(&["sub", "exp", "iss", "aud"]);
        validation.leeway = 0;

        Self {
            ttl,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, Duration::minutes(config.jwt_expiration_minutes))
    }

    /// Sign a token for a principal whose password was just verified
    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: ISSUER.to_owned(),
            aud: AUDIENCE.to_owned(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(JwtError::Signing)
    }

    /// Check signature, expiry, issuer and audience
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims)
    }
}

/// Token part of an `Authorization: Bearer <token>` value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_issued_token_verifies() {
        let jwt = JwtService::new(SECRET, Duration::minutes(60));
        let id = Uuid::new_v4();

        let claims = jwt.verify(&jwt.issue(id, "hr@example.com", Role::Hr).unwrap()).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::Hr);
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn test_expired_token_refused() {
        let jwt = JwtService::new(SECRET, Duration::minutes(-10));
        let token = jwt.issue(Uuid::new_v4(), "a@example.com", Role::Employee).unwrap();
        assert!(matches!(jwt.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_other_secret_refused() {
        let token = JwtService::new("someone-elses-secret", Duration::minutes(60))
            .issue(Uuid::new_v4(), "a@example.com", Role::Admin)
            .unwrap();
        let jwt = JwtService::new(SECRET, Duration::minutes(60));
        assert!(matches!(jwt.verify(&token), Err(JwtError::BadSignature)));
    }

    #[test]
    fn test_garbage_refused() {
        let jwt = JwtService::new(SECRET, Duration::minutes(60));
        assert!(matches!(jwt.verify("not.a.jwt"), Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer  "), None);
    }
}
