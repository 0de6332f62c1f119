//! Request pacing for detail page fetches.
//!
//! A leaky bucket of one: consecutive request starts are spaced at least
//! `min_interval` apart. There is no burst capacity.

use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum gap between the starts of consecutive requests.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_start: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_start: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Time left before the next request may start.
    pub fn remaining(&self) -> Duration {
        match self.last_start {
            Some(last) => self.min_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Wait until a request may start, then record its start time.
    ///
    /// Call once per request attempt, whether or not it succeeds.
    pub async fn acquire(&mut self) {
        let wait = self.remaining();
        if !wait.is_zero() {
            log::debug!("Rate limit: sleeping {} ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
        self.last_start = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_does_not_wait() {
        let mut limiter = RateLimiter::from_millis(1500);
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_starts_are_spaced() {
        let mut limiter = RateLimiter::from_millis(1500);

        limiter.acquire().await;
        let first = Instant::now();

        // Work between requests that is shorter than the floor
        tokio::time::sleep(Duration::from_millis(400)).await;

        limiter.acquire().await;
        let second = Instant::now();

        assert!(second - first >= Duration::from_millis(1500));
        assert!(second - first < Duration::from_millis(1510));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_slow_work() {
        let mut limiter = RateLimiter::from_millis(1500);
        limiter.acquire().await;

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(limiter.remaining(), Duration::ZERO);

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let mut limiter = RateLimiter::from_millis(0);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
