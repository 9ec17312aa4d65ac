//! Rate limiting middleware.
//!
//! Two independent per-client limits: a strict one for the submit route and
//! a default one for every other route.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header::RETRY_AFTER, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use crate::config::WebConfig;

/// Per-client rate limiter keyed by client address.
pub type ClientRateLimiter = DefaultKeyedRateLimiter<String>;

/// Interval between sweeps of idle limiter entries.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Build a quota allowing at most `limit` requests in any `window`.
///
/// The whole allowance is available as a burst. Each spent cell comes back
/// one full window after it was used.
fn quota(limit: u32, window: Duration) -> Quota {
    let burst = NonZeroU32::new(limit).unwrap_or(NonZeroU32::MIN);
    Quota::with_period(window)
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}

/// State for rate limiting.
pub struct RateLimitState {
    /// Limiter for the submit endpoint.
    submit: ClientRateLimiter,
    /// Limiter for all other endpoints.
    api: ClientRateLimiter,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(
        submit_limit: u32,
        submit_window: Duration,
        api_limit: u32,
        api_window: Duration,
    ) -> Self {
        Self {
            submit: RateLimiter::keyed(quota(submit_limit, submit_window)),
            api: RateLimiter::keyed(quota(api_limit, api_window)),
        }
    }

    /// Create a rate limit state from web configuration.
    pub fn from_config(config: &WebConfig) -> Self {
        Self::new(
            config.submit_rate_limit,
            Duration::from_secs(config.submit_rate_window_secs),
            config.api_rate_limit,
            Duration::from_secs(config.api_rate_window_secs),
        )
    }

    fn check(limiter: &ClientRateLimiter, key: &str) -> Result<(), Duration> {
        limiter
            .check_key(&key.to_string())
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// Check if a submission is allowed for the given client.
    ///
    /// On denial returns how long the client has to wait.
    pub fn check_submit(&self, key: &str) -> Result<(), Duration> {
        Self::check(&self.submit, key)
    }

    /// Check if a request to any other endpoint is allowed for the given client.
    pub fn check_api(&self, key: &str) -> Result<(), Duration> {
        Self::check(&self.api, key)
    }

    /// Drop entries for clients whose allowance has fully refilled.
    pub fn cleanup(&self) {
        self.submit.retain_recent();
        self.submit.shrink_to_fit();
        self.api.retain_recent();
        self.api.shrink_to_fit();
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                self.cleanup();
                tracing::debug!("Rate limiter entries swept");
            }
        });
    }
}

/// Extract the client key from a request.
///
/// Prefers the first `X-Forwarded-For` entry, then `X-Real-IP`, then the
/// peer address.
fn client_key(req: &Request<Body>) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(ip) = header("X-Forwarded-For").and_then(|v| v.split(',').next()) {
        return ip.trim().to_string();
    }

    if let Some(ip) = header("X-Real-IP") {
        return ip.to_string();
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

fn too_many_requests(retry_after: Duration, message: &'static str) -> Response {
    let mut response = (StatusCode::TOO_MANY_REQUESTS, message).into_response();
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    response
        .headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(secs));
    response
}

/// Rate limiting middleware for the submit endpoint.
pub async fn submit_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = client_key(&req);

    if let Err(wait) = state.check_submit(&key) {
        tracing::warn!(client = %key, "Submit rate limit exceeded");
        return too_many_requests(wait, "Too many applications. Please try again later.");
    }

    next.run(req).await
}

/// Rate limiting middleware for general API.
pub async fn api_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = client_key(&req);

    if let Err(wait) = state.check_api(&key) {
        tracing::warn!(client = %key, "API rate limit exceeded");
        return too_many_requests(wait, "Too many requests. Please try again later.");
    }

    next.run(req).await
}
