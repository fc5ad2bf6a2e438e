use keeper_core::{Round, Season};
use serde::{Deserialize, Serialize};

/// How the target roster came to hold the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionKind {
    /// Drafted directly by the target roster
    Drafted,

    /// Received in a trade; lineage traced through the losing side
    Traded,

    /// Claimed off waivers
    Waiver,

    /// Added as a free agent
    FreeAgent,

    /// Moved by a commissioner action
    Commissioner,

    /// No draft or transaction evidence exists
    Undrafted,
}

/// Result of a lineage trace.
///
/// `origin_season` is the last reset point of the keeper-cost clock, not
/// necessarily the season the player first entered the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionRecord {
    pub origin_season: Season,
    pub draft_round: Option<Round>,
    pub kind: AcquisitionKind,
}
