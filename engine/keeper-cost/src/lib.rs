//! # Keeper Cost
//!
//! Pure functions from an acquisition record and the league settings to
//! years kept, base cost, final cost, and keeper eligibility. No hidden
//! state: the offseason reset has already been folded into the record's
//! origin season by the tracer, so the math here is a straight line.

use acquisition_tracer::AcquisitionRecord;
use keeper_core::{LeagueSettings, Round, Season};
use serde::{Deserialize, Serialize};

/// Computed cost of keeping a player into the target season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperCost {
    /// Seasons since the last reset point
    pub years_kept: u32,

    /// Origin draft round, or the configured undrafted constant
    pub base_cost: Round,

    /// `max(minimum_round, base_cost - years_kept)`
    pub final_cost: Round,
}

/// Which keeper mechanisms remain open for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    /// May still be kept as a regular keeper (or franchise tagged)
    Regular,

    /// Regular-keeper years exhausted; only a franchise tag or a fresh
    /// draft applies
    FranchiseOnly,
}

/// Cost of keeping `record`'s player into `target_season`.
///
/// `years_kept = target_season - origin_season`; an origin in the future of
/// the target (possible only with malformed input) clamps to zero.
pub fn compute_cost(
    record: &AcquisitionRecord,
    target_season: Season,
    settings: &LeagueSettings,
) -> KeeperCost {
    let years_kept = (target_season - record.origin_season).max(0) as u32;
    let base_cost = record.draft_round.unwrap_or(settings.undrafted_round);
    let final_cost = base_cost.saturating_sub(years_kept).max(settings.minimum_round);

    KeeperCost { years_kept, base_cost, final_cost }
}

/// Eligibility for the regular-keeper quota. Franchise tags use the same
/// cost formula but draw on their own quota, so they are always open here.
pub fn eligibility(years_kept: u32, settings: &LeagueSettings) -> Eligibility {
    if years_kept < settings.max_regular_keeper_years {
        Eligibility::Regular
    } else {
        Eligibility::FranchiseOnly
    }
}
