//! In-memory feed implementations used by engine tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use keeper_core::{
    DraftEvent, LeagueId, RosterSlot, SeasonLeague, TradedPickRecord, TransactionRecord,
};

use crate::feed::{KeeperCandidate, LeagueSyncFeed, SyncError, SyncResult};

/// Feed backed by plain in-memory ledgers. Unknown leagues resolve to
/// `Ok(None)` / empty vectors, mirroring a provider with no data.
#[derive(Default)]
pub struct MemoryFeed {
    leagues: HashMap<LeagueId, SeasonLeague>,
    rosters: HashMap<LeagueId, Vec<RosterSlot>>,
    drafts: HashMap<LeagueId, Vec<DraftEvent>>,
    transactions: HashMap<LeagueId, Vec<TransactionRecord>>,
    traded_picks: HashMap<LeagueId, Vec<TradedPickRecord>>,
    candidates: HashMap<LeagueId, Vec<KeeperCandidate>>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_league(&mut self, league: SeasonLeague) {
        self.leagues.insert(league.external_id.clone(), league);
    }

    pub fn set_rosters(&mut self, id: impl Into<LeagueId>, rosters: Vec<RosterSlot>) {
        self.rosters.insert(id.into(), rosters);
    }

    pub fn push_draft_event(&mut self, event: DraftEvent) {
        self.drafts.entry(event.league.clone()).or_default().push(event);
    }

    pub fn push_transaction(&mut self, id: impl Into<LeagueId>, txn: TransactionRecord) {
        self.transactions.entry(id.into()).or_default().push(txn);
    }

    pub fn set_traded_picks(&mut self, id: impl Into<LeagueId>, picks: Vec<TradedPickRecord>) {
        self.traded_picks.insert(id.into(), picks);
    }

    pub fn set_keeper_candidates(
        &mut self,
        id: impl Into<LeagueId>,
        candidates: Vec<KeeperCandidate>,
    ) {
        self.candidates.insert(id.into(), candidates);
    }
}

#[async_trait::async_trait]
impl LeagueSyncFeed for MemoryFeed {
    async fn league(&self, id: &LeagueId) -> SyncResult<Option<SeasonLeague>> {
        Ok(self.leagues.get(id).cloned())
    }

    async fn rosters(&self, id: &LeagueId) -> SyncResult<Vec<RosterSlot>> {
        Ok(self.rosters.get(id).cloned().unwrap_or_default())
    }

    async fn draft_events(&self, id: &LeagueId) -> SyncResult<Vec<DraftEvent>> {
        Ok(self.drafts.get(id).cloned().unwrap_or_default())
    }

    async fn transactions(&self, id: &LeagueId) -> SyncResult<Vec<TransactionRecord>> {
        Ok(self.transactions.get(id).cloned().unwrap_or_default())
    }

    async fn traded_picks(&self, id: &LeagueId) -> SyncResult<Vec<TradedPickRecord>> {
        Ok(self.traded_picks.get(id).cloned().unwrap_or_default())
    }

    async fn keeper_candidates(&self, id: &LeagueId) -> SyncResult<Vec<KeeperCandidate>> {
        Ok(self.candidates.get(id).cloned().unwrap_or_default())
    }
}

/// Test double that fails the first `fail_times` calls with a transient
/// error, then delegates. Exercises the retry path end to end.
pub struct FlakyFeed<F> {
    inner: F,
    remaining: AtomicU32,
}

impl<F: LeagueSyncFeed> FlakyFeed<F> {
    pub fn new(inner: F, fail_times: u32) -> Self {
        Self { inner, remaining: AtomicU32::new(fail_times) }
    }

    fn trip(&self) -> Option<SyncError> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .ok()
            .map(|_| SyncError::transient("simulated provider outage"))
    }
}

#[async_trait::async_trait]
impl<F: LeagueSyncFeed> LeagueSyncFeed for FlakyFeed<F> {
    async fn league(&self, id: &LeagueId) -> SyncResult<Option<SeasonLeague>> {
        match self.trip() {
            Some(e) => Err(e),
            None => self.inner.league(id).await,
        }
    }

    async fn rosters(&self, id: &LeagueId) -> SyncResult<Vec<RosterSlot>> {
        match self.trip() {
            Some(e) => Err(e),
            None => self.inner.rosters(id).await,
        }
    }

    async fn draft_events(&self, id: &LeagueId) -> SyncResult<Vec<DraftEvent>> {
        match self.trip() {
            Some(e) => Err(e),
            None => self.inner.draft_events(id).await,
        }
    }

    async fn transactions(&self, id: &LeagueId) -> SyncResult<Vec<TransactionRecord>> {
        match self.trip() {
            Some(e) => Err(e),
            None => self.inner.transactions(id).await,
        }
    }

    async fn traded_picks(&self, id: &LeagueId) -> SyncResult<Vec<TradedPickRecord>> {
        match self.trip() {
            Some(e) => Err(e),
            None => self.inner.traded_picks(id).await,
        }
    }

    async fn keeper_candidates(&self, id: &LeagueId) -> SyncResult<Vec<KeeperCandidate>> {
        match self.trip() {
            Some(e) => Err(e),
            None => self.inner.keeper_candidates(id).await,
        }
    }
}
