//! Bounded exponential backoff around any feed implementation

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use keeper_core::{
    DraftEvent, LeagueId, RosterSlot, SeasonLeague, TradedPickRecord, TransactionRecord,
};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::warn;

use crate::feed::{KeeperCandidate, LeagueSyncFeed, SyncResult};
use crate::rate_limit::SlidingWindowLimiter;

/// Retry configuration for external fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts (first call included)
    pub max_attempts: u32,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: u64,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, initial_delay_ms: 500, max_delay_ms: 30_000, backoff_multiplier: 2.0 }
    }
}

/// Wraps a feed with retry-on-transient-failure and an optional outbound
/// rate limit consulted before every call.
pub struct RetryingFeed<F> {
    inner: F,
    policy: RetryPolicy,
    limiter: Option<Arc<SlidingWindowLimiter>>,
}

impl<F: LeagueSyncFeed> RetryingFeed<F> {
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy, limiter: None }
    }

    pub fn with_limiter(mut self, limiter: Arc<SlidingWindowLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    async fn with_retry<T, C, Fut>(&self, op: &str, mut call: C) -> SyncResult<T>
    where
        C: FnMut() -> Fut,
        Fut: Future<Output = SyncResult<T>>,
    {
        let mut delay = Duration::from_millis(self.policy.initial_delay_ms);
        // a zero-attempt policy still makes the initial call
        let attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=attempts {
            if let Some(limiter) = &self.limiter {
                limiter.acquire().await;
            }

            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!("{} attempt {} failed: {}, retrying in {:?}", op, attempt, e, delay);
                    sleep(delay).await;
                    delay = Duration::from_millis(
                        (delay.as_millis() as f64 * self.policy.backoff_multiplier)
                            .min(self.policy.max_delay_ms as f64) as u64,
                    );
                }
                Err(e) => return Err(e),
            }
        }

        unreachable!("retry loop returns on final attempt")
    }
}

#[async_trait::async_trait]
impl<F: LeagueSyncFeed> LeagueSyncFeed for RetryingFeed<F> {
    async fn league(&self, id: &LeagueId) -> SyncResult<Option<SeasonLeague>> {
        self.with_retry("league", || self.inner.league(id)).await
    }

    async fn rosters(&self, id: &LeagueId) -> SyncResult<Vec<RosterSlot>> {
        self.with_retry("rosters", || self.inner.rosters(id)).await
    }

    async fn draft_events(&self, id: &LeagueId) -> SyncResult<Vec<DraftEvent>> {
        self.with_retry("draft_events", || self.inner.draft_events(id)).await
    }

    async fn transactions(&self, id: &LeagueId) -> SyncResult<Vec<TransactionRecord>> {
        self.with_retry("transactions", || self.inner.transactions(id)).await
    }

    async fn traded_picks(&self, id: &LeagueId) -> SyncResult<Vec<TradedPickRecord>> {
        self.with_retry("traded_picks", || self.inner.traded_picks(id)).await
    }

    async fn keeper_candidates(&self, id: &LeagueId) -> SyncResult<Vec<KeeperCandidate>> {
        self.with_retry("keeper_candidates", || self.inner.keeper_candidates(id)).await
    }
}
