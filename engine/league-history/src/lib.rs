//! # League History
//!
//! Builds the chronological chain of season-scoped league records by walking
//! the provider's previous-league back-pointer, and establishes stable
//! franchise identity across seasons by external owner id. Row ids are
//! season-local and never used for cross-season identity.

pub mod continuity;
pub mod graph;

pub use continuity::RosterContinuity;
pub use graph::{HistoryError, LeagueChain, LeagueHistoryGraph};

/// Default bound on chain traversal; guards against malformed cyclic chains
pub const DEFAULT_MAX_DEPTH: usize = 10;
