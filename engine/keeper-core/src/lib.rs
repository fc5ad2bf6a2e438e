//! # Keeper Core
//!
//! Shared data model for the keeper league engine. Every other engine crate
//! builds on the types defined here: season-scoped league records, draft and
//! transaction ledgers, traded-pick facts, and the computed keeper output.
//!
//! Raw provider facts (e.g. the draft-time `keeper_reserved` flag on a pick)
//! and computed output (`KeeperSelection`) are deliberately distinct types.

pub mod ledger;
pub mod settings;
pub mod types;
pub mod window;

pub use ledger::LeagueLedger;
pub use settings::{LeagueSettings, SettingsError};
pub use types::{
    DraftEvent, DraftPick, KeeperKind, KeeperSelection, LeagueId, OwnerId, PlayerId,
    PlayerMovement, RosterId, RosterSlot, Round, Season, SeasonLeague, TradedPickRecord,
    TransactionKind, TransactionRecord,
};
pub use window::{OffseasonWindow, TradeTiming};

/// Re-export commonly used time types
pub use chrono::{DateTime, Utc};
