use std::collections::BTreeMap;

use keeper_core::{LeagueLedger, Season};
use league_history::RosterContinuity;

/// The per-season ledgers of one league chain plus the identity map built
/// from it. Read-only view handed to the tracer; assembled by the
/// orchestrator.
pub struct LedgerSet<'a> {
    ledgers: BTreeMap<Season, &'a LeagueLedger>,
    continuity: &'a RosterContinuity,
}

impl<'a> LedgerSet<'a> {
    pub fn new(
        ledgers: impl IntoIterator<Item = &'a LeagueLedger>,
        continuity: &'a RosterContinuity,
    ) -> Self {
        let ledgers = ledgers.into_iter().map(|l| (l.season, l)).collect();
        Self { ledgers, continuity }
    }

    pub fn continuity(&self) -> &RosterContinuity {
        self.continuity
    }

    /// Ledgers oldest season first
    pub fn oldest_first(&self) -> impl Iterator<Item = &&'a LeagueLedger> {
        self.ledgers.values()
    }

    pub fn ledger(&self, season: Season) -> Option<&'a LeagueLedger> {
        self.ledgers.get(&season).copied()
    }
}
