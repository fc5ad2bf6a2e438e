//! # Cascade Resolver
//!
//! Resolves draft-round collisions among a roster's selected keepers against
//! the rounds the roster actually owns. Cheaper keepers hold their claimed
//! round; everyone else scans upward (toward higher round numbers) for the
//! next owned, unoccupied round. Bounded by the total round count: a keeper
//! with no open round left is flagged unresolved, never looped.

pub mod board;
pub mod resolver;

pub use board::{DraftBoard, SlotStatus};
pub use resolver::{resolve, CascadeOutcome, CascadeReason, ProvisionalKeeper};
