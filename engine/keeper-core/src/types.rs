use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External league id as issued by the provider (e.g. "992120910279124992")
pub type LeagueId = String;

/// Stable external owner id; the same owner id across seasons is the same
/// logical franchise even though roster row ids differ per season
pub type OwnerId = String;

/// Season-local roster row id; never valid across seasons
pub type RosterId = u32;

/// Provider player id
pub type PlayerId = u64;

/// Season year (e.g. 2025)
pub type Season = i32;

/// Draft round, 1-based
pub type Round = u32;

/// One season-scoped league record in the history chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonLeague {
    /// Internal row id
    pub id: u64,

    /// External provider league id
    pub external_id: LeagueId,

    /// Season year this record covers
    pub season: Season,

    /// Back-pointer to the previous season's league, if any
    pub previous: Option<LeagueId>,
}

/// A season-local roster row mapped to its external owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSlot {
    pub roster_id: RosterId,

    /// Missing owner mappings are skipped (and logged) during identity
    /// resolution rather than failing the chain build
    pub owner: Option<OwnerId>,
}

/// A draft for one season, with its ordered picks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftEvent {
    pub league: LeagueId,
    pub season: Season,
    pub picks: Vec<DraftPick>,
}

/// One pick inside a draft event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPick {
    /// Round, 1-based
    pub round: Round,

    /// Overall pick number; chronological order within the event
    pub pick_number: u32,

    /// Slot within the round
    pub slot: u32,

    /// Player taken with this pick, if any
    pub player: Option<PlayerId>,

    /// Season-local roster that made the pick
    pub roster: RosterId,

    /// Draft-time flag marking this slot as pre-reserved for a keeper.
    /// This is a raw provider fact, not a computed keeper record.
    pub keeper_reserved: bool,
}

/// How a transaction moved players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Trade,
    Waiver,
    FreeAgent,
    Commissioner,
}

/// An append-only historical transaction fact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u64,
    pub kind: TransactionKind,
    pub timestamp: DateTime<Utc>,
    pub season: Season,
    pub movements: Vec<PlayerMovement>,
}

/// One player move within a transaction.
///
/// A `None` from_roster is a free-agency add; a `None` to_roster is a drop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMovement {
    pub player: PlayerId,
    pub from_roster: Option<RosterId>,
    pub to_roster: Option<RosterId>,
}

/// Which keeper quota a selection draws against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeeperKind {
    Regular,
    Franchise,
}

/// Computed keeper output. Fully recomputed and replaced on every engine
/// run, never incrementally patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperSelection {
    pub player: PlayerId,
    pub owner: OwnerId,
    pub target_season: Season,
    pub kind: KeeperKind,
    pub years_kept: u32,
    pub base_cost: Round,
    pub final_cost: Round,
    pub locked: bool,
}

/// Transferred ownership of a future draft-round slot, independent of any
/// player movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradedPickRecord {
    pub season: Season,
    pub round: Round,
    pub original_owner: OwnerId,
    pub current_owner: OwnerId,
}
