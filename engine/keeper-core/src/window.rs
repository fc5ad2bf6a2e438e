//! Calendar classification of trades relative to the keeper cycle.
//!
//! The exact boundary between "in-season" and "offseason" is a league policy
//! choice, so both edges are configuration rather than constants. The default
//! window treats a trade between the roster-lock point of season N-1 and the
//! next rollover as an offseason trade targeting season N.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Season;

/// Configurable offseason boundary.
///
/// A calendar year splits into three spans:
/// - before the rollover (Jan .. rollover): offseason targeting this year's
///   draft
/// - rollover .. roster lock: the active season, trades preserve accrual
/// - after roster lock (.. Dec 31): offseason targeting next year's draft
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OffseasonWindow {
    /// First day of the active season (month, day)
    pub rollover_month: u32,
    pub rollover_day: u32,

    /// Last day rosters may still trade in-season (month, day)
    pub lock_month: u32,
    pub lock_day: u32,
}

impl Default for OffseasonWindow {
    fn default() -> Self {
        // Sep 1 rollover, Nov 30 roster lock
        Self { rollover_month: 9, rollover_day: 1, lock_month: 11, lock_day: 30 }
    }
}

/// How a trade timestamp relates to the keeper cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeTiming {
    /// Executed during active play of `season`; lineage and accrual carry
    /// through unchanged
    InSeason { season: Season },

    /// Executed between one season's roster lock and the next draft; resets
    /// the accrual clock for the receiving roster ahead of `target_season`
    Offseason { target_season: Season },
}

impl OffseasonWindow {
    /// Classify a trade timestamp. Pure over the explicit timestamp; the
    /// engine never reads the ambient clock.
    pub fn classify(&self, ts: DateTime<Utc>) -> TradeTiming {
        let year = ts.year();
        let md = (ts.month(), ts.day());

        if md < (self.rollover_month, self.rollover_day) {
            TradeTiming::Offseason { target_season: year }
        } else if md <= (self.lock_month, self.lock_day) {
            TradeTiming::InSeason { season: year }
        } else {
            TradeTiming::Offseason { target_season: year + 1 }
        }
    }

    /// The season whose games were most recently underway at `ts`. Used to
    /// bound which drafts can be evidence for an acquisition at that moment.
    pub fn active_season_at(&self, ts: DateTime<Utc>) -> Season {
        match self.classify(ts) {
            TradeTiming::InSeason { season } => season,
            TradeTiming::Offseason { target_season } => target_season - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn february_trade_is_offseason_for_that_year() {
        let w = OffseasonWindow::default();
        assert_eq!(w.classify(ts(2025, 2, 10)), TradeTiming::Offseason { target_season: 2025 });
    }

    #[test]
    fn october_trade_is_in_season() {
        let w = OffseasonWindow::default();
        assert_eq!(w.classify(ts(2024, 10, 15)), TradeTiming::InSeason { season: 2024 });
    }

    #[test]
    fn december_trade_targets_next_season() {
        let w = OffseasonWindow::default();
        assert_eq!(w.classify(ts(2024, 12, 5)), TradeTiming::Offseason { target_season: 2025 });
    }

    #[test]
    fn boundary_days_are_inclusive() {
        let w = OffseasonWindow::default();
        // rollover day itself is in-season
        assert_eq!(w.classify(ts(2024, 9, 1)), TradeTiming::InSeason { season: 2024 });
        // lock day itself is still in-season
        assert_eq!(w.classify(ts(2024, 11, 30)), TradeTiming::InSeason { season: 2024 });
        // the day after the lock is offseason
        assert_eq!(w.classify(ts(2024, 12, 1)), TradeTiming::Offseason { target_season: 2025 });
    }

    #[test]
    fn active_season_spans_the_offseason() {
        let w = OffseasonWindow::default();
        assert_eq!(w.active_season_at(ts(2025, 2, 10)), 2024);
        assert_eq!(w.active_season_at(ts(2024, 10, 15)), 2024);
        assert_eq!(w.active_season_at(ts(2025, 9, 20)), 2025);
    }
}
