use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Enforces a minimum spacing between outbound calls to the same endpoint.
///
/// `throttle` reserves the endpoint's next slot under the lock, *before* the
/// suspend point of the sleep, so concurrent callers observe each other's
/// reservations and queue one interval apart instead of bursting. One shared
/// instance per process, injected into the services that need it.
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(HashMap::new()),
        }
    }

    /// Suspends until at least `min_interval` has passed since the previous
    /// reserved call to `endpoint`. Never fails; the wait is bounded by the
    /// interval times the number of queued callers.
    pub async fn throttle(&self, endpoint: &str) {
        let scheduled = {
            let mut last_call = self.last_call.lock().await;
            let now = Instant::now();
            let scheduled = match last_call.get(endpoint) {
                Some(&previous) => now.max(previous + self.min_interval),
                None => now,
            };
            last_call.insert(endpoint.to_string(), scheduled);
            scheduled
        };

        if scheduled > Instant::now() {
            debug!(endpoint, "throttling outbound call");
            sleep_until(scheduled).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn back_to_back_calls_are_spaced_by_the_interval() {
        let limiter = RateLimiter::new(INTERVAL);

        limiter.throttle("gnews").await;
        let first = Instant::now();
        limiter.throttle("gnews").await;
        let second = Instant::now();

        assert!(second - first >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_queue_rather_than_burst() {
        let limiter = RateLimiter::new(INTERVAL);
        let start = Instant::now();

        tokio::join!(
            limiter.throttle("gnews"),
            limiter.throttle("gnews"),
            limiter.throttle("gnews"),
        );

        // Three callers serialize into slots 0s, 10s, and 20s out.
        assert!(Instant::now() - start >= INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn endpoints_are_throttled_independently() {
        let limiter = RateLimiter::new(INTERVAL);
        let start = Instant::now();

        limiter.throttle("gnews").await;
        limiter.throttle("yahoo").await;

        assert!(Instant::now() - start < INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate() {
        let limiter = RateLimiter::new(INTERVAL);
        let start = Instant::now();
        limiter.throttle("gnews").await;
        assert_eq!(Instant::now(), start);
    }
}
