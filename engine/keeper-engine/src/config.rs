use keeper_core::OffseasonWindow;
use league_sync::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Engine-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Bound on league-chain traversal depth
    pub max_chain_depth: usize,

    /// Retry policy applied to every external fetch
    pub retry: RetryPolicy,

    /// Outbound rate limit: requests per window
    pub rate_limit_max_requests: usize,

    /// Outbound rate limit: window length in seconds
    pub rate_limit_window_secs: u64,

    /// Calendar boundary separating in-season from offseason trades
    pub offseason: OffseasonWindow,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: league_history::DEFAULT_MAX_DEPTH,
            retry: RetryPolicy::default(),
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
            offseason: OffseasonWindow::default(),
        }
    }
}
