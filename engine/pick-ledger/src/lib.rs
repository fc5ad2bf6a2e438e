//! # Pick Ledger
//!
//! Tracks per-season draft-round ownership transfers, independent of player
//! movement. The cascade resolver consults this to know which rounds a roster
//! actually owns for the target season.

use std::collections::{BTreeMap, BTreeSet};

use keeper_core::{OwnerId, Round, Season, TradedPickRecord};
use tracing::debug;

/// Ownership ledger for future draft-round slots.
///
/// Records are append-only facts in feed order; a later transfer of the same
/// slot supersedes an earlier one.
#[derive(Debug, Default, Clone)]
pub struct TradedPickLedger {
    // (season, round, original owner) -> current owner
    transfers: BTreeMap<(Season, Round, OwnerId), OwnerId>,
}

impl TradedPickLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[TradedPickRecord]) -> Self {
        let mut ledger = Self::new();
        for record in records {
            ledger.record(record);
        }
        ledger
    }

    pub fn record(&mut self, record: &TradedPickRecord) {
        debug!(
            "season {} round {}: pick of {} now held by {}",
            record.season, record.round, record.original_owner, record.current_owner
        );
        self.transfers.insert(
            (record.season, record.round, record.original_owner.clone()),
            record.current_owner.clone(),
        );
    }

    /// Rounds `owner` may fill in `season`: every native round minus those
    /// traded away, plus rounds acquired from other rosters.
    pub fn owned_rounds(&self, owner: &OwnerId, season: Season, total_rounds: Round) -> BTreeSet<Round> {
        let mut owned: BTreeSet<Round> = (1..=total_rounds).collect();

        for ((s, round, original), current) in &self.transfers {
            if *s != season {
                continue;
            }
            if original == owner && current != owner {
                owned.remove(round);
            }
        }
        // additions after removals: an acquired pick restores a round the
        // roster's own native pick left
        for ((s, round, original), current) in &self.transfers {
            if *s == season && current == owner && original != owner {
                owned.insert(*round);
            }
        }

        owned
    }
}
