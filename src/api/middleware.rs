// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-client fixed-window rate limiting.
//!
//! Clients are keyed by peer IP. Window state lives in an LRU map so a
//! flood of distinct clients cannot grow it without bound; entries older
//! than one window are treated as absent.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use lru::LruCache;

use crate::config::RateLimitConfig;
use crate::error::ApiError;
use crate::exceptions::DomainException;
use crate::state::AppState;

/// Maximum number of distinct clients tracked at once.
pub const DEFAULT_TRACKED_CLIENTS: usize = 10_000;

const UNKNOWN_CLIENT: &str = "unknown";

struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client.
pub struct RateLimiter {
    windows: Mutex<LruCache<String, Window>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            windows: Mutex::new(LruCache::new(capacity)),
            window: config.window,
            max_requests: config.max_requests,
        }
    }

    /// Count one request for `client`. Returns `false` once the client has
    /// used up its allowance for the current window.
    pub fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(entry) = windows.get_mut(client) {
            if now.duration_since(entry.started_at) < self.window {
                if entry.count >= self.max_requests {
                    return false;
                }
                entry.count += 1;
                return true;
            }
        }

        windows.put(
            client.to_string(),
            Window {
                started_at: now,
                count: 1,
            },
        );
        self.max_requests > 0
    }
}

fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Reject requests over the limit with `RequestTooFrequent`.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_key(&request);
    if state.rate_limiter.check(&client) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        ApiError::from(DomainException::request_too_frequent(None)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window: Duration) -> RateLimiter {
        RateLimiter::new(
            &RateLimitConfig {
                window,
                max_requests,
            },
            16,
        )
    }

    #[test]
    fn admits_up_to_limit_then_rejects() {
        let limiter = limiter(3, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = limiter(1, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = limiter(1, Duration::from_millis(1));
        assert!(limiter.check("10.0.0.1"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(limiter.check("10.0.0.1"));
    }

    #[test]
    fn evicts_least_recent_client_at_capacity() {
        let limiter = RateLimiter::new(
            &RateLimitConfig {
                window: Duration::from_secs(60),
                max_requests: 1,
            },
            1,
        );
        assert!(limiter.check("a"));
        assert!(limiter.check("b"));
        // "a" was evicted, so it starts a fresh window
        assert!(limiter.check("a"));
    }

    #[test]
    fn missing_peer_address_uses_shared_key() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(client_key(&request), UNKNOWN_CLIENT);

        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 4000))));
        assert_eq!(client_key(&request), "192.168.1.7");
    }
}
