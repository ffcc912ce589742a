//! Fixed-window request counter keyed by client address.
//!
//! Advisory traffic shaping: each key gets `max_requests` hits per window;
//! the window restarts on the first hit after it expires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, warn};

const PRUNE_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct FixedWindow {
    started: Instant,
    count: u32,
}

impl FixedWindow {
    fn new(now: Instant) -> Self {
        Self { started: now, count: 0 }
    }

    fn expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.started) >= window
    }

    fn try_hit(&mut self, now: Instant, window: Duration, max: u32) -> Decision {
        if self.expired(now, window) {
            *self = FixedWindow::new(now);
        }
        if self.count < max {
            self.count += 1;
            Decision::Allowed { remaining: max - self.count }
        } else {
            let elapsed = now.saturating_duration_since(self.started);
            Decision::Limited { retry_after: window.saturating_sub(elapsed) }
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, FixedWindow>>,
    window: Duration,
    max_requests: u32,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32, enabled: bool) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            window,
            max_requests,
            enabled,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::from_secs(1), u32::MAX, false)
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        if !self.enabled {
            return Decision::Allowed { remaining: self.max_requests };
        }
        if self.windows.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        let decision = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| FixedWindow::new(now))
            .try_hit(now, self.window, self.max_requests);

        match decision {
            Decision::Allowed { remaining } => debug!(client = %key, remaining, "rate limit hit counted"),
            Decision::Limited { retry_after } => warn!(
                client = %key,
                retry_after_secs = retry_after.as_secs(),
                "rate limit exceeded"
            ),
        }
        decision
    }

    /// Drop windows that have already expired.
    pub fn prune(&self, now: Instant) {
        let window = self.window;
        self.windows.retain(|_, w| !w.expired(now, window));
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_window_allows_up_to_max() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3, true);
        let now = Instant::now();
        assert_eq!(limiter.check_at("a", now), Decision::Allowed { remaining: 2 });
        assert_eq!(limiter.check_at("a", now), Decision::Allowed { remaining: 1 });
        assert_eq!(limiter.check_at("a", now), Decision::Allowed { remaining: 0 });
        assert!(!limiter.check_at("a", now).is_allowed());
    }

    #[test]
    fn test_clients_are_counted_separately() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1, true);
        let now = Instant::now();
        assert!(limiter.check_at("10.0.0.1", now).is_allowed());
        assert!(!limiter.check_at("10.0.0.1", now).is_allowed());
        assert!(limiter.check_at("10.0.0.2", now).is_allowed());
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_limited_reports_retry_after() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1, true);
        let start = Instant::now();
        limiter.check_at("a", start);
        match limiter.check_at("a", start + Duration::from_secs(20)) {
            Decision::Limited { retry_after } => assert_eq!(retry_after, Duration::from_secs(40)),
            other => panic!("expected limited, got {other:?}"),
        }
    }

    #[test]
    fn test_prune_drops_expired_windows() {
        let limiter = RateLimiter::new(Duration::from_secs(10), 5, true);
        let start = Instant::now();
        limiter.check_at("a", start);
        limiter.check_at("b", start + Duration::from_secs(8));
        limiter.prune(start + Duration::from_secs(12));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[tokio::test]
    async fn test_window_resets_after_expiry() {
        let limiter = RateLimiter::new(Duration::from_millis(200), 2, true);

        assert!(limiter.check("a").is_allowed());
        assert!(limiter.check("a").is_allowed());
        assert!(!limiter.check("a").is_allowed());

        sleep(Duration::from_millis(300)).await;

        assert!(limiter.check("a").is_allowed());
    }

    #[tokio::test]
    async fn test_rate_limiter_disabled() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1, false);

        // Should always allow when disabled
        for _ in 0..100 {
            assert!(limiter.check("a").is_allowed());
        }
        assert_eq!(limiter.tracked_clients(), 0);
    }
}
