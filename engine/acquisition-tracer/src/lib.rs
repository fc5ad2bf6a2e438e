//! # Acquisition Tracer
//!
//! Determines, per (player, owner, target season), how and when a roster
//! acquired a player: direct draft evidence first, then the transaction
//! ledger, unwinding trade chains with an explicit worklist and visited set.
//! Resolves the provider's redraft anomaly (multiple draft picks for one
//! player within a single draft event) deterministically before any lineage
//! decision is made.

pub mod anomaly;
pub mod ledger_set;
pub mod record;
pub mod tracer;

pub use anomaly::{authoritative_picks, resolve_keeper_anomalies, AnomalyFix, KeeperRecordView};
pub use ledger_set::LedgerSet;
pub use record::{AcquisitionKind, AcquisitionRecord};
pub use tracer::AcquisitionTracer;
