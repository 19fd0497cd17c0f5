use std::sync::Arc;
use crate::rate_limit::RateLimiter;
use crate::upstream::UpstreamClient;
// app's shared state - owned by the router, one per server (or per test)

pub struct AppState {
    pub upstream: UpstreamClient,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, rate_limiter: RateLimiter) -> Self {
        Self {
            upstream,
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}
