/*
[INPUT]:  Published request quota (requests per hour)
[OUTPUT]: Fixed pre-request delay applied to every call
[POS]:    HTTP layer - client-side rate limiting
[UPDATE]: When the exchange quota changes or adaptive throttling is added
*/

use std::time::Duration;

use tokio::time::sleep;
use tracing::trace;

/// Published quota: 10,000 requests per hour per API key
pub const DEFAULT_REQUESTS_PER_HOUR: u32 = 10_000;

const NANOS_PER_HOUR: u64 = 3_600 * 1_000_000_000;

/// Fixed minimum delay paid before every request.
///
/// There is no burst allowance: each call waits the full interval regardless of history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    min_interval: Duration,
}

impl RateLimit {
    /// Derive the delay from an hourly quota (`3600s / requests_per_hour`).
    ///
    /// A quota of zero disables the delay.
    pub fn from_quota(requests_per_hour: u32) -> Self {
        if requests_per_hour == 0 {
            return Self::disabled();
        }
        Self {
            min_interval: Duration::from_nanos(NANOS_PER_HOUR / u64::from(requests_per_hour)),
        }
    }

    /// Use an explicit delay
    pub fn from_interval(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    /// Zero delay, for tests and local mocks
    pub fn disabled() -> Self {
        Self {
            min_interval: Duration::ZERO,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Suspend the calling task for the configured interval
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        trace!(delay = ?self.min_interval, "rate limit wait");
        sleep(self.min_interval).await;
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::from_quota(DEFAULT_REQUESTS_PER_HOUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_default_quota_interval() {
        let limit = RateLimit::default();
        assert_eq!(limit.min_interval(), Duration::from_millis(360));
    }

    #[test]
    fn test_zero_quota_disables_delay() {
        assert_eq!(RateLimit::from_quota(0), RateLimit::disabled());
        assert!(RateLimit::disabled().min_interval().is_zero());
    }

    #[tokio::test]
    async fn test_wait_pays_full_interval_every_call() {
        let limit = RateLimit::from_interval(Duration::from_millis(40));
        let start = Instant::now();
        limit.wait().await;
        limit.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_disabled_wait_returns_immediately() {
        let start = Instant::now();
        RateLimit::disabled().wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
