use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Round;

/// Per-league keeper rules, supplied by the settings store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSettings {
    /// Regular keeper slots per roster
    pub max_keepers: u32,

    /// Franchise-tag slots per roster; separate from the regular quota
    pub max_franchise_tags: u32,

    /// Seasons a player may be kept as a regular keeper before only a
    /// franchise tag (or a fresh draft) applies
    pub max_regular_keeper_years: u32,

    /// Base cost charged for a player who was never drafted
    pub undrafted_round: Round,

    /// Floor for every final cost
    pub minimum_round: Round,

    /// Rounds in the draft
    pub total_rounds: Round,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            max_keepers: 3,
            max_franchise_tags: 1,
            max_regular_keeper_years: 3,
            undrafted_round: 10,
            minimum_round: 1,
            total_rounds: 16,
        }
    }
}

/// Errors raised by settings validation
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("minimum_round {minimum} exceeds total_rounds {total}")]
    MinimumAboveTotal { minimum: Round, total: Round },

    #[error("undrafted_round {undrafted} exceeds total_rounds {total}")]
    UndraftedAboveTotal { undrafted: Round, total: Round },

    #[error("total_rounds must be > 0")]
    NoRounds,
}

impl LeagueSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.total_rounds == 0 {
            return Err(SettingsError::NoRounds);
        }
        if self.minimum_round > self.total_rounds {
            return Err(SettingsError::MinimumAboveTotal {
                minimum: self.minimum_round,
                total: self.total_rounds,
            });
        }
        if self.undrafted_round > self.total_rounds {
            return Err(SettingsError::UndraftedAboveTotal {
                undrafted: self.undrafted_round,
                total: self.total_rounds,
            });
        }
        Ok(())
    }
}
