//! Token bucket rate limiter for the login endpoints.
//!
//! Disabled unless `auth.login_rate_limit` is non-zero. Clients are keyed by
//! peer address; `X-Forwarded-For` counts only when the proxy is trusted.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::warn;

use salat_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Simple in-memory token bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → bucket state.
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
    /// Whether `X-Forwarded-For` identifies the client.
    trust_forwarded_for: bool,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            max_tokens,
            refill_rate,
            trust_forwarded_for: false,
        }
    }

    /// Keys clients on the first `X-Forwarded-For` hop when set.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Allows `per_minute` attempts per client, refilled evenly over a minute.
    pub fn per_minute(per_minute: u32) -> Self {
        Self::new(per_minute, f64::from(per_minute) / 60.0)
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();

        // A refilled bucket is the same as a fresh one.
        let max_tokens = f64::from(self.max_tokens);
        buckets.retain(|_, bucket| {
            let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
            bucket.tokens + elapsed * self.refill_rate < max_tokens
        });

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: max_tokens,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(max_tokens);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Client key: the peer address, or the first `X-Forwarded-For` hop when
/// the proxy is trusted.
fn client_key(request: &Request, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for
        .then(|| {
            request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .flatten();

    forwarded
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rejects login attempts beyond the configured rate.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.login_limiter {
        let key = client_key(&request, limiter.trust_forwarded_for);
        if !limiter.check(&key).await {
            warn!(client = %key, "Login attempt rate limited");
            return ApiError(AppError::rate_limited(
                "Too many login attempts, try again later",
            ))
            .into_response();
        }
    }
    next.run(request).await
}
