//! # League Sync
//!
//! The read-only collaborator feed for the keeper engine. The provider client
//! lives outside the engine; this crate defines the normalized-feed contract
//! (`LeagueSyncFeed`), the retry wrapper with exponential backoff, and the
//! sliding-window rate limiter that gates every outbound call.
//!
//! `MemoryFeed` backs the engine's tests with plain in-memory ledgers.

pub mod feed;
pub mod memory;
pub mod rate_limit;
pub mod retry;

pub use feed::{KeeperCandidate, LeagueSyncFeed, SyncError, SyncResult};
pub use memory::{FlakyFeed, MemoryFeed};
pub use rate_limit::SlidingWindowLimiter;
pub use retry::{RetryPolicy, RetryingFeed};
