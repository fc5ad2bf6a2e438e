use acquisition_tracer::AnomalyFix;
use cascade_resolver::{CascadeOutcome, DraftBoard};
use keeper_core::{KeeperSelection, LeagueId, OwnerId, PlayerId, Season};
use serde::{Deserialize, Serialize};

/// Complete replacement output of one engine run. Deterministically ordered
/// (owners ascending, players ascending) so repeated runs over unchanged
/// ledgers are identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeeperComputeReport {
    pub league: LeagueId,
    pub target_season: Season,
    pub per_roster: Vec<RosterKeeperReport>,
    pub unresolved: Vec<UnresolvedKeeper>,
    pub partial_sync: Vec<PartialSync>,
    pub anomaly_fixes: Vec<AnomalyFix>,

    /// Set when chain traversal stopped at an unresolvable back-pointer; the
    /// run covered only the seasons in front of it
    pub broken_chain: Option<LeagueId>,
}

/// One roster's computed keepers, cascade placements, and draft board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterKeeperReport {
    pub owner: OwnerId,
    pub keepers: Vec<KeeperSelection>,
    pub cascade: Vec<CascadeOutcome>,
    pub board: DraftBoard,
}

/// Why a candidate could not be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// No owned, unoccupied round remained for the keeper
    NoOpenRound,

    /// Regular-keeper quota already filled by cheaper selections
    QuotaExceeded,

    /// Franchise-tag quota already filled by cheaper selections
    FranchiseQuotaExceeded,

    /// Kept too many years for the regular quota; franchise tag required
    IneligibleRegular,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedKeeper {
    pub owner: OwnerId,
    pub player: PlayerId,
    pub reason: UnresolvedReason,
}

/// A league whose ledger fetch failed after retries; the run continued with
/// the partial chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSync {
    pub league: LeagueId,
    pub season: Season,
    pub error: String,
}
