//! Error surface of the orchestrator.
//!
//! Only failures that leave the engine with nothing meaningful to report are
//! errors. Data anomalies, missing evidence, broken chain links, and
//! unresolvable cascades are all reported inside the result instead.

use keeper_core::{LeagueId, SettingsError};
use league_history::HistoryError;
use league_sync::SyncError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("feed error: {0}")]
    Sync(#[from] SyncError),

    #[error("history error: {0}")]
    History(#[from] HistoryError),

    #[error("no settings configured for league {league}")]
    MissingSettings { league: LeagueId },

    #[error("invalid league settings: {0}")]
    Settings(#[from] SettingsError),
}
