use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;

// Rate limit entry - one fixed window per client identity
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
}

// Fixed window counter keyed by client identity.
//
// Windows are only replaced lazily on access. Without the sweeper an entry
// stays for the life of the process, one per distinct identity seen.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    limit: u32,      // max requests per window
    window: Duration, // window length
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
        }
    }

    pub fn allow(&self, identity: &str) -> bool {
        self.allow_at(identity, Instant::now())
    }

    // The entry guard holds the shard lock, so the read-modify-write below
    // is atomic for one identity.
    pub fn allow_at(&self, identity: &str, now: Instant) -> bool {
        let mut entry = self
            .entries
            .entry(identity.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                reset_at: now + self.window,
            });

        // window expired..? start a new one
        if now > entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window;
            return true;
        }

        // over limit (a fresh entry has count 0)
        if entry.count >= self.limit {
            return false;
        }

        entry.count += 1;
        true
    }

    // Drop windows that have already expired, returns how many were removed
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now <= entry.reset_at);
        before.saturating_sub(self.entries.len())
    }

    // Number of identities currently tracked
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// Background sweep of expired windows - only spawned when configured
pub async fn window_sweeper(rate_limiter: Arc<RateLimiter>, sweep_interval: Duration) {
    let mut interval = interval(sweep_interval);

    tracing::info!(interval = ?sweep_interval, "rate window sweeper started");

    loop {
        interval.tick().await;

        let removed = rate_limiter.sweep_expired(Instant::now());
        if removed > 0 {
            tracing::debug!(
                removed,
                remaining = rate_limiter.len(),
                "swept expired rate windows"
            );
        }
    }
}
