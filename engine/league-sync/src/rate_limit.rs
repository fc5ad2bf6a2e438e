//! Sliding request-count window enforced before each outbound call

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Caps outbound requests to `max_requests` per `window`.
///
/// `acquire` blocks (asynchronously) until a slot frees; callers therefore
/// never observe a provider-side rate-limit rejection under normal operation.
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    stamps: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        assert!(max_requests > 0, "limiter requires max_requests > 0");
        Self { max_requests, window, stamps: Mutex::new(VecDeque::new()) }
    }

    /// Wait until a request slot is available, then claim it
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut stamps = self.stamps.lock().await;
                let now = Instant::now();
                while let Some(front) = stamps.front() {
                    if now.duration_since(*front) >= self.window {
                        stamps.pop_front();
                    } else {
                        break;
                    }
                }
                if stamps.len() < self.max_requests {
                    stamps.push_back(now);
                    return;
                }
                // oldest stamp decides when the window slides past it
                self.window - now.duration_since(*stamps.front().expect("non-empty"))
            };
            debug!("rate limit window full, waiting {:?}", wait);
            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn burst_within_limit_passes_immediately() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(1));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn fourth_request_waits_for_window() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(1));
        for _ in 0..3 {
            limiter.acquire().await;
        }
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
