// Request middleware: per-IP rate limiting
//
// The original deployment throttled players to roughly one email per
// second; a token bucket per source IP gives the same cap while letting
// short bursts through.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Shared rate limiter state; clone freely (it's an Arc inside).
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    buckets: DashMap<IpAddr, Bucket>,
    /// Maximum tokens per IP (burst capacity)
    capacity: f64,
    /// Tokens added per second (sustained rate)
    refill_rate: f64,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64, burst: f64) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                buckets: DashMap::new(),
                capacity: burst,
                refill_rate: requests_per_second,
            }),
        }
    }

    /// Returns true if the request from `ip` is within limits; consumes one
    /// token.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut bucket = self.inner.buckets.entry(ip).or_insert_with(|| Bucket {
            tokens: self.inner.capacity,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens =
            (bucket.tokens + elapsed * self.inner.refill_rate).min(self.inner.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drop buckets idle longer than `idle_secs` so the map stays bounded.
    pub fn purge_idle(&self, idle_secs: u64) {
        let cutoff = Duration::from_secs(idle_secs);
        let now = Instant::now();
        self.inner
            .buckets
            .retain(|_, bucket| now.duration_since(bucket.last_refill) < cutoff);
    }

    pub fn tracked_ips(&self) -> usize {
        self.inner.buckets.len()
    }
}

/// Axum middleware enforcing the per-IP limit.
///
/// The limiter arrives as a request extension; when it is not wired up the
/// request passes (the server degrades to unthrottled rather than erroring).
/// Returns 429 when the sender's bucket is dry.
pub async fn rate_limit_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(limiter) = request.extensions().get::<RateLimiter>().cloned() else {
        return Ok(next.run(request).await);
    };

    // Prefer X-Forwarded-For so a reverse proxy doesn't collapse every
    // player onto one bucket.
    let ip = extract_ip(&request).unwrap_or(IpAddr::from([127, 0, 0, 1]));

    if limiter.check(ip) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(ip = %ip, "Rate limit exceeded");
        Err(StatusCode::TOO_MANY_REQUESTS)
    }
}

fn extract_ip(request: &Request<Body>) -> Option<IpAddr> {
    let forwarded_for = request.headers().get("x-forwarded-for")?;
    let value = forwarded_for.to_str().ok()?;
    // Leftmost entry is the actual client
    value.split(',').next()?.trim().parse::<IpAddr>().ok()
}
