//! Fixed-window request limiting
//!
//! Each client gets `max_requests` per `window_secs`. Counters live in
//! Redis when it is configured and reachable, otherwise in process.

use crate::error::ApiError;
use crate::state::AppState;
use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

pub const X_RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const X_RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

const ANONYMOUS_KEY: &str = "anonymous";

/// Counter backend
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `key` and return the count in the current window
    async fn increment(&self, key: &str, window_secs: u64) -> Result<u64>;
}

/// Redis counters
///
/// Each hit runs `SET key 0 EX window NX` and `INCR` in one `MULTI`
/// transaction, so a counter never exists without its TTL.
#[derive(Clone)]
pub struct RedisRateLimiter {
    manager: ConnectionManager,
}

impl RedisRateLimiter {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    fn build_key(key: &str) -> String {
        format!("fittrack:ratelimit:{}", key)
    }

    fn window_pipeline(redis_key: &str, window_secs: u64) -> redis::Pipeline {
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("SET")
            .arg(redis_key)
            .arg(0)
            .arg("EX")
            .arg(window_secs)
            .arg("NX")
            .ignore()
            .cmd("INCR")
            .arg(redis_key);
        pipe
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn increment(&self, key: &str, window_secs: u64) -> Result<u64> {
        let redis_key = Self::build_key(key);
        let mut conn = self.manager.clone();

        let (count,): (u64,) = Self::window_pipeline(&redis_key, window_secs)
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }
}

/// In-process counters for development, tests and Redis outages
#[derive(Default)]
pub struct MemoryRateLimiter {
    windows: Mutex<HashMap<String, (Instant, u64)>>,
}

impl MemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn increment(&self, key: &str, window_secs: u64) -> Result<u64> {
        let window = Duration::from_secs(window_secs);
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        // Drop ended windows
        windows.retain(|_, (started, _)| now.duration_since(*started) < window);

        let entry = windows.entry(key.to_string()).or_insert((now, 0));
        entry.1 += 1;
        Ok(entry.1)
    }
}

/// Bucket by owner key when the caller presents a valid token
fn client_key(state: &AppState, request: &Request) -> String {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| state.jwt().validate_token(token).ok())
        .map(|claims| format!("owner:{}", claims.sub))
        .unwrap_or_else(|| ANONYMOUS_KEY.to_string())
}

/// Middleware rejecting requests over the configured limit with 429
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let limits = &state.config().rate_limit;
    if !limits.enabled {
        return Ok(next.run(request).await);
    }

    let key = client_key(&state, &request);
    let count = match state.limiter().increment(&key, limits.window_secs).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, key = %key, "Rate limiter unavailable, allowing request");
            return Ok(next.run(request).await);
        }
    };

    if count > limits.max_requests {
        warn!(key = %key, count, "Rate limit exceeded");
        return Err(ApiError::TooManyRequests);
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(X_RATE_LIMIT_LIMIT, HeaderValue::from(limits.max_requests));
    headers.insert(
        X_RATE_LIMIT_REMAINING,
        HeaderValue::from(limits.max_requests.saturating_sub(count)),
    );
    Ok(response)
}
