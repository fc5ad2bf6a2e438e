//! # Keeper Engine
//!
//! The batch orchestrator for keeper eligibility and cost resolution. One
//! entry point, `KeeperEngine::compute_keeper_costs`, walks the league
//! history chain, fetches per-season ledgers in parallel behind retry and
//! rate-limit plumbing, traces every keeper candidate's acquisition lineage,
//! applies the cost formula, and resolves draft-slot collisions per roster.
//!
//! Recomputation is idempotent: the report is a complete replacement of any
//! prior output, so concurrent triggers converge instead of interleaving
//! partial writes.

pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod settings;


pub use config::EngineConfig;
pub use engine::KeeperEngine;
pub use error::EngineError;
pub use report::{
    KeeperComputeReport, PartialSync, RosterKeeperReport, UnresolvedKeeper, UnresolvedReason,
};
pub use settings::{LeagueSettingsStore, StaticSettings};

/// Current version of the engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
