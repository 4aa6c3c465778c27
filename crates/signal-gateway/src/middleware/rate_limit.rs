//! Submission rate limiting: per-identity sliding window.
//!
//! Each client identity may make at most K accepted submissions inside the
//! trailing window W. Timestamps are pruned lazily on every check; the
//! rejection carries the seconds remaining until the oldest in-window
//! timestamp ages out (minimum 1).
//!
//! Identity comes from the first `x-forwarded-for` entry when present,
//! else the direct connection address, else a single shared "unknown"
//! bucket. The forwarded header is only as trustworthy as the fronting
//! proxy; the deployment must secure that boundary.

use crate::config::RateLimitConfig;
use crate::error::ApiError;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Bucket shared by every client whose address cannot be determined.
const UNKNOWN_IDENTITY: &str = "unknown";

/// Sliding-window limiter state shared across requests.
pub struct SubmissionLimiter {
    /// Per-identity timestamps of accepted submissions, oldest first.
    entries: DashMap<String, Vec<Instant>>,
    config: RateLimitConfig,
}

impl SubmissionLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
        }
    }

    /// Check whether `identity` may submit now.
    pub fn check(&self, identity: &str) -> Result<(), u64> {
        self.check_at(identity, Instant::now())
    }

    /// Check against an explicit clock reading.
    ///
    /// On rejection returns the whole seconds (rounded up, minimum 1) until
    /// the oldest in-window timestamp leaves the window.
    pub fn check_at(&self, identity: &str, now: Instant) -> Result<(), u64> {
        if !self.config.enabled {
            return Ok(());
        }

        let window = self.config.window;
        let mut stamps = self.entries.entry(identity.to_string()).or_default();

        // Lazy pruning: drop everything that has aged out of the window.
        stamps.retain(|t| now.duration_since(*t) < window);

        if (stamps.len() as u32) < self.config.max_submissions {
            stamps.push(now);
            return Ok(());
        }

        // Timestamps are appended in order, so the head is the oldest.
        let remaining = match stamps.first() {
            Some(oldest) => window.saturating_sub(now.duration_since(*oldest)),
            None => Duration::ZERO,
        };
        let retry_after = ((remaining.as_millis() as u64 + 999) / 1000).max(1);
        Err(retry_after)
    }

    /// Drop identities whose every timestamp has aged out. Idle identities
    /// otherwise keep stale entries harmlessly until next touched.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let window = self.config.window;
        self.entries.retain(|identity, stamps| {
            let live = stamps.iter().any(|t| now.duration_since(*t) < window);
            if !live {
                debug!(identity = %identity, "Removing idle rate limit entry");
            }
            live
        });
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.entries.len()
    }
}

/// Rate limit layer for the submission route.
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: Arc<SubmissionLimiter>,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(SubmissionLimiter::new(config)),
        }
    }

    pub fn limiter(&self) -> Arc<SubmissionLimiter> {
        Arc::clone(&self.limiter)
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: Arc::clone(&self.limiter),
        }
    }
}

/// Rate limit service.
#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: Arc<SubmissionLimiter>,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let limiter = Arc::clone(&self.limiter);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let identity = extract_client_identity(&req);

            match limiter.check(&identity) {
                Ok(()) => inner.call(req).await,
                Err(retry_after) => {
                    warn!(
                        identity = %identity,
                        retry_after_secs = retry_after,
                        "Submission rate limit exceeded"
                    );
                    Ok(ApiError::rate_limited(retry_after).into_response())
                }
            }
        })
    }
}

/// Derive the client identity for rate limiting.
fn extract_client_identity<B>(req: &Request<B>) -> String {
    // Forwarded header first: take the original client, the first entry.
    if let Some(forwarded) = req.headers().get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first) = forwarded_str.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    // Fall back to the direct connection address.
    if let Some(connect_info) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    UNKNOWN_IDENTITY.to_string()
}

/// Background task dropping idle rate limit entries.
pub async fn cleanup_task(limiter: Arc<SubmissionLimiter>, interval: Duration) {
    let mut cleanup_interval = tokio::time::interval(interval);
    cleanup_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        cleanup_interval.tick().await;
        limiter.cleanup();
    }
}
