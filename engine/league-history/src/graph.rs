use keeper_core::{LeagueId, SeasonLeague};
use league_sync::{LeagueSyncFeed, SyncError};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

use crate::continuity::RosterContinuity;

/// Errors from chain construction. A broken link mid-chain is not an error;
/// only a head that cannot be resolved at all fails the build.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("head league not found: {league}")]
    HeadNotFound { league: LeagueId },

    #[error("feed error: {0}")]
    Sync(#[from] SyncError),
}

/// Oldest-first chain of season leagues plus cross-season roster identity
#[derive(Debug, Clone)]
pub struct LeagueChain {
    /// Oldest first; the last entry is the head (target) league
    pub seasons: Vec<SeasonLeague>,

    pub continuity: RosterContinuity,

    /// Where traversal stopped early on an unresolvable back-pointer, if it did
    pub broken_link: Option<LeagueId>,
}

impl LeagueChain {
    pub fn head(&self) -> &SeasonLeague {
        self.seasons.last().expect("chain is never empty")
    }

    pub fn league_for_season(&self, season: keeper_core::Season) -> Option<&SeasonLeague> {
        self.seasons.iter().find(|l| l.season == season)
    }
}

/// Walks the previous-league back-pointer into an ordered chain
pub struct LeagueHistoryGraph;

impl LeagueHistoryGraph {
    /// Build the chain starting from `head`, walking back at most `max_depth`
    /// seasons. Traversal terminates quietly at a missing pointer, an
    /// unresolvable reference, a repeated league id, or the depth bound.
    pub async fn build<F: LeagueSyncFeed>(
        feed: &F,
        head: &LeagueId,
        max_depth: usize,
    ) -> Result<LeagueChain, HistoryError> {
        let head_league = feed
            .league(head)
            .await?
            .ok_or_else(|| HistoryError::HeadNotFound { league: head.clone() })?;

        let mut newest_first = vec![head_league];
        let mut visited: HashSet<LeagueId> = HashSet::from([head.clone()]);
        let mut broken_link = None;

        while newest_first.len() < max_depth {
            let Some(prev_id) = newest_first.last().and_then(|l| l.previous.clone()) else {
                break;
            };
            if !visited.insert(prev_id.clone()) {
                warn!("league chain loops back to {}, stopping traversal", prev_id);
                broken_link = Some(prev_id);
                break;
            }
            match feed.league(&prev_id).await {
                Ok(Some(league)) => newest_first.push(league),
                Ok(None) => {
                    warn!("previous league {} unresolvable, continuing with partial chain", prev_id);
                    broken_link = Some(prev_id);
                    break;
                }
                Err(e) => {
                    warn!("fetching previous league {} failed ({}), continuing with partial chain", prev_id, e);
                    broken_link = Some(prev_id);
                    break;
                }
            }
        }

        newest_first.reverse();
        let seasons = newest_first;

        let mut continuity = RosterContinuity::new();
        for league in &seasons {
            match feed.rosters(&league.external_id).await {
                Ok(slots) => continuity.register_season(league.season, &slots),
                Err(e) => {
                    warn!("rosters for {} unavailable ({}), identity map will be partial", league.external_id, e);
                }
            }
        }

        info!(
            "built league chain of {} seasons ({}..={})",
            seasons.len(),
            seasons.first().map(|l| l.season).unwrap_or_default(),
            seasons.last().map(|l| l.season).unwrap_or_default(),
        );

        Ok(LeagueChain { seasons, continuity, broken_link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_core::RosterSlot;
    use league_sync::MemoryFeed;

    fn league(id: u64, external: &str, season: i32, previous: Option<&str>) -> SeasonLeague {
        SeasonLeague {
            id,
            external_id: external.to_string(),
            season,
            previous: previous.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn chain_is_oldest_first() {
        let mut feed = MemoryFeed::new();
        feed.insert_league(league(3, "lg-2025", 2025, Some("lg-2024")));
        feed.insert_league(league(2, "lg-2024", 2024, Some("lg-2023")));
        feed.insert_league(league(1, "lg-2023", 2023, None));

        let chain =
            LeagueHistoryGraph::build(&feed, &"lg-2025".to_string(), 10).await.unwrap();
        let seasons: Vec<i32> = chain.seasons.iter().map(|l| l.season).collect();
        assert_eq!(seasons, vec![2023, 2024, 2025]);
        assert_eq!(chain.head().external_id, "lg-2025");
        assert!(chain.broken_link.is_none());
    }

    #[tokio::test]
    async fn broken_pointer_yields_partial_chain() {
        let mut feed = MemoryFeed::new();
        feed.insert_league(league(2, "lg-2025", 2025, Some("lg-gone")));

        let chain =
            LeagueHistoryGraph::build(&feed, &"lg-2025".to_string(), 10).await.unwrap();
        assert_eq!(chain.seasons.len(), 1);
        assert_eq!(chain.broken_link.as_deref(), Some("lg-gone"));
    }

    #[tokio::test]
    async fn cyclic_chain_stops_at_depth_or_revisit() {
        let mut feed = MemoryFeed::new();
        feed.insert_league(league(1, "lg-a", 2025, Some("lg-b")));
        feed.insert_league(league(2, "lg-b", 2024, Some("lg-a")));

        let chain = LeagueHistoryGraph::build(&feed, &"lg-a".to_string(), 10).await.unwrap();
        assert_eq!(chain.seasons.len(), 2);
        assert!(chain.broken_link.is_some());
    }

    #[tokio::test]
    async fn continuity_is_built_from_owner_ids() {
        let mut feed = MemoryFeed::new();
        feed.insert_league(league(2, "lg-2024", 2024, Some("lg-2023")));
        feed.insert_league(league(1, "lg-2023", 2023, None));
        feed.set_rosters(
            "lg-2023",
            vec![RosterSlot { roster_id: 1, owner: Some("franchise-x".to_string()) }],
        );
        feed.set_rosters(
            "lg-2024",
            vec![
                RosterSlot { roster_id: 6, owner: Some("franchise-x".to_string()) },
                RosterSlot { roster_id: 7, owner: None },
            ],
        );

        let chain =
            LeagueHistoryGraph::build(&feed, &"lg-2024".to_string(), 10).await.unwrap();
        assert_eq!(chain.continuity.roster_of(&"franchise-x".to_string(), 2023), Some(1));
        assert_eq!(chain.continuity.roster_of(&"franchise-x".to_string(), 2024), Some(6));
        assert_eq!(chain.continuity.owner_of(2024, 7), None);
    }

    #[tokio::test]
    async fn missing_head_is_an_error() {
        let feed = MemoryFeed::new();
        let err = LeagueHistoryGraph::build(&feed, &"lg-x".to_string(), 10).await.unwrap_err();
        assert!(matches!(err, HistoryError::HeadNotFound { .. }));
    }
}
