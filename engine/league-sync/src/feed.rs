//! Feed contract and error surface

use keeper_core::{
    DraftEvent, KeeperKind, LeagueId, OwnerId, PlayerId, RosterSlot, SeasonLeague,
    TradedPickRecord, TransactionRecord,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for feed operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by a feed implementation
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// Transient network or provider failure; safe to retry
    #[error("transient fetch failure: {message}")]
    Transient { message: String },

    /// Provider signalled an outbound rate limit
    #[error("rate limited by provider")]
    RateLimited,

    /// League id did not resolve
    #[error("league not found: {league}")]
    NotFound { league: LeagueId },

    /// Response could not be normalized into engine shapes
    #[error("malformed feed data: {message}")]
    Malformed { message: String },
}

impl SyncError {
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient { message: msg.into() }
    }

    /// Whether the retry wrapper should attempt this call again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::RateLimited)
    }
}

/// A roster manager's provisional keeper choice for the target season.
/// Input to the engine; everything derived about it is recomputed each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeeperCandidate {
    pub player: PlayerId,
    pub owner: OwnerId,
    pub kind: KeeperKind,
    pub locked: bool,
}

/// Read-only feed of normalized league data.
///
/// Implementations own all provider-specific parsing; the engine consumes
/// only the shapes defined in `keeper-core`.
#[async_trait::async_trait]
pub trait LeagueSyncFeed: Send + Sync {
    /// Resolve one season-scoped league record
    async fn league(&self, id: &LeagueId) -> SyncResult<Option<SeasonLeague>>;

    /// Season-local roster rows for a league
    async fn rosters(&self, id: &LeagueId) -> SyncResult<Vec<RosterSlot>>;

    /// Draft events (with ordered picks) for a league
    async fn draft_events(&self, id: &LeagueId) -> SyncResult<Vec<DraftEvent>>;

    /// Transaction history for a league
    async fn transactions(&self, id: &LeagueId) -> SyncResult<Vec<TransactionRecord>>;

    /// Draft-pick ownership transfers recorded against a league
    async fn traded_picks(&self, id: &LeagueId) -> SyncResult<Vec<TradedPickRecord>>;

    /// Provisional keeper choices entered for the target season
    async fn keeper_candidates(&self, id: &LeagueId) -> SyncResult<Vec<KeeperCandidate>>;
}
