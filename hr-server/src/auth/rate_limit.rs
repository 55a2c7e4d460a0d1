//! Per-IP rate limiting for login and password recovery

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::{AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::security_log;
use crate::state::AppState;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window limit: `max_requests` per `window`
#[derive(Debug, Clone, Copy)]
pub struct RateRule {
    pub name: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

pub const LOGIN: RateRule = RateRule {
    name: "login",
    max_requests: 5,
    window: Duration::from_secs(60),
};

pub const FORGOT_PASSWORD: RateRule = RateRule {
    name: "forgot_password",
    max_requests: 3,
    window: Duration::from_secs(60),
};

/// Entries idle longer than this are dropped by [`RateLimiter::cleanup`]
const STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Clone, Default)]
pub struct RateLimiter {
    /// rule name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
    trust_proxy: bool,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key on `X-Forwarded-For` instead of the peer address.
    ///
    /// Only for deployments behind a proxy that overwrites the header.
    pub fn trusting_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(&self, rule: RateRule, ip: &str) -> bool {
        let mut map = self.inner.lock().await;
        let rule_map = map.entry(rule.name).or_default();
        let now = Instant::now();

        let entry = rule_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= rule.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= rule.max_requests
    }

    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let now = Instant::now();

        for rule_map in map.values_mut() {
            rule_map.retain(|_, entry| now.duration_since(entry.window_start) < STALE_AFTER);
        }
        map.retain(|_, rule_map| !rule_map.is_empty());
    }
}

/// Client IP: the peer address, or the first X-Forwarded-For entry when the
/// proxy is trusted.
fn extract_ip(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy
        && let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn enforce(state: &AppState, rule: RateRule, request: Request, next: Next) -> Result<Response, AppError> {
    let ip = extract_ip(&request, state.rate_limiter.trust_proxy);
    if !state.rate_limiter.check(rule, &ip).await {
        security_log!("WARN", "rate_limited", rule = rule.name, ip = ip);
        return Err(AppError::new(ErrorCode::TooManyRequests));
    }
    Ok(next.run(request).await)
}

/// 5 login attempts per minute per IP
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&state, LOGIN, request, next).await
}

/// 3 reset requests per minute per IP
pub async fn forgot_password_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&state, FORGOT_PASSWORD, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_applies_per_ip() {
        let limiter = RateLimiter::new();
        for _ in 0..LOGIN.max_requests {
            assert!(limiter.check(LOGIN, "10.0.0.1").await);
        }
        assert!(!limiter.check(LOGIN, "10.0.0.1").await);
        assert!(limiter.check(LOGIN, "10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_rules_are_independent() {
        let limiter = RateLimiter::new();
        for _ in 0..FORGOT_PASSWORD.max_requests {
            assert!(limiter.check(FORGOT_PASSWORD, "10.0.0.1").await);
        }
        assert!(!limiter.check(FORGOT_PASSWORD, "10.0.0.1").await);
        assert!(limiter.check(LOGIN, "10.0.0.1").await);
    }

    fn request_from(peer: &str, forwarded: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/api/auth/login");
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut req = builder.body(axum::body::Body::empty()).unwrap();
        let addr: std::net::SocketAddr = format!("{peer}:40000").parse().unwrap();
        req.extensions_mut().insert(axum::extract::ConnectInfo(addr));
        req
    }

    #[test]
    fn test_forwarded_header_ignored_by_default() {
        let req = request_from("10.0.0.7", Some("1.2.3.4"));
        assert_eq!(extract_ip(&req, false), "10.0.0.7");
    }

    #[test]
    fn test_forwarded_header_used_behind_trusted_proxy() {
        let req = request_from("10.0.0.7", Some(" 1.2.3.4 , 10.0.0.7"));
        assert_eq!(extract_ip(&req, true), "1.2.3.4");

        let req = request_from("10.0.0.7", None);
        assert_eq!(extract_ip(&req, true), "10.0.0.7");
    }

    #[tokio::test]
    async fn test_rotating_forwarded_header_does_not_reset_limit() {
        let limiter = RateLimiter::new();
        for i in 0..LOGIN.max_requests {
            let req = request_from("10.0.0.9", Some(&format!("192.0.2.{i}")));
            assert!(limiter.check(LOGIN, &extract_ip(&req, limiter.trust_proxy)).await);
        }
        let req = request_from("10.0.0.9", Some("198.51.100.1"));
        assert!(!limiter.check(LOGIN, &extract_ip(&req, limiter.trust_proxy)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets() {
        let limiter = RateLimiter::new();
        for _ in 0..=LOGIN.max_requests {
            limiter.check(LOGIN, "10.0.0.1").await;
        }
        assert!(!limiter.check(LOGIN, "10.0.0.1").await);

        tokio::time::advance(LOGIN.window).await;
        assert!(limiter.check(LOGIN, "10.0.0.1").await);
    }
}
