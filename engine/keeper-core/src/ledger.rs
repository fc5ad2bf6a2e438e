use serde::{Deserialize, Serialize};

use crate::types::{
    DraftEvent, LeagueId, RosterSlot, Season, TradedPickRecord, TransactionRecord,
};

/// Everything the engine knows about one season-scoped league: the normalized
/// ledger snapshot handed to the tracer and resolver. Assembled by the
/// orchestrator from feed calls; the engine itself performs no provider I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueLedger {
    pub league: LeagueId,
    pub season: Season,
    pub rosters: Vec<RosterSlot>,
    pub draft_events: Vec<DraftEvent>,
    pub transactions: Vec<TransactionRecord>,
    pub traded_picks: Vec<TradedPickRecord>,
}

impl LeagueLedger {
    /// An empty ledger for a league whose fetch failed; processing continues
    /// with whatever evidence the rest of the chain provides.
    pub fn empty(league: LeagueId, season: Season) -> Self {
        Self {
            league,
            season,
            rosters: Vec::new(),
            draft_events: Vec::new(),
            transactions: Vec::new(),
            traded_picks: Vec::new(),
        }
    }
}
