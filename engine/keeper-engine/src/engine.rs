//! Batch orchestration of one keeper-cost run

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use acquisition_tracer::{
    resolve_keeper_anomalies, AcquisitionKind, AcquisitionTracer, AnomalyFix, LedgerSet,
};
use cascade_resolver::{resolve, DraftBoard, ProvisionalKeeper};
use keeper_core::{
    DraftEvent, KeeperKind, KeeperSelection, LeagueId, LeagueLedger, LeagueSettings, OwnerId,
    PlayerId, Season, SeasonLeague, TradedPickRecord,
};
use keeper_cost::{compute_cost, eligibility, Eligibility};
use league_history::{LeagueChain, LeagueHistoryGraph};
use league_sync::{
    KeeperCandidate, LeagueSyncFeed, RetryingFeed, SlidingWindowLimiter, SyncError,
};
use pick_ledger::TradedPickLedger;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::{
    KeeperComputeReport, PartialSync, RosterKeeperReport, UnresolvedKeeper, UnresolvedReason,
};
use crate::settings::LeagueSettingsStore;

/// The batch engine. Holds the retry-wrapped feed, the settings store, and
/// the run configuration; every computation is a pure function of those plus
/// the explicit `as_of` timestamp.
pub struct KeeperEngine<F, S> {
    feed: RetryingFeed<F>,
    settings: S,
    config: EngineConfig,
}

impl<F: LeagueSyncFeed, S: LeagueSettingsStore> KeeperEngine<F, S> {
    pub fn new(feed: F, settings: S, config: EngineConfig) -> Self {
        let limiter = Arc::new(SlidingWindowLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        ));
        let feed = RetryingFeed::new(feed, config.retry.clone()).with_limiter(limiter);
        Self { feed, settings, config }
    }

    /// Recompute every keeper cost and draft-slot placement for the league
    /// rooted at `head`, targeting `target_season`.
    ///
    /// The report is a complete replacement of any previous run's output:
    /// nothing is patched incrementally, so repeated or concurrent triggers
    /// over unchanged ledgers converge on byte-identical results.
    pub async fn compute_keeper_costs(
        &self,
        head: &LeagueId,
        target_season: Season,
        as_of: DateTime<Utc>,
    ) -> Result<KeeperComputeReport, EngineError> {
        let settings = self
            .settings
            .settings(head)
            .ok_or_else(|| EngineError::MissingSettings { league: head.clone() })?;
        settings.validate()?;

        let chain =
            LeagueHistoryGraph::build(&self.feed, head, self.config.max_chain_depth).await?;
        if let Some(broken) = &chain.broken_link {
            warn!("history behind {} is unavailable, computing from partial chain", broken);
        }

        let (ledgers, mut partial_sync) = self.fetch_ledgers(&chain).await;

        // head-league candidate input must be readable; without it there is
        // nothing to compute
        let mut candidates = self.feed.keeper_candidates(head).await?;

        let transfers: Vec<TradedPickRecord> =
            ledgers.iter().flat_map(|l| l.traded_picks.iter().cloned()).collect();
        let pick_ledger = TradedPickLedger::from_records(&transfers);

        let ledger_set = LedgerSet::new(ledgers.iter(), &chain.continuity);
        let tracer = AcquisitionTracer::new(&ledger_set, self.config.offseason);

        let events: Vec<DraftEvent> =
            ledgers.iter().flat_map(|l| l.draft_events.iter().cloned()).collect();
        let records: Vec<(OwnerId, PlayerId)> =
            candidates.iter().map(|c| (c.owner.clone(), c.player)).collect();
        let mut anomaly_fixes = resolve_keeper_anomalies(&events, &chain.continuity, &records);
        // a record is stale only when no later evidence explains the owner's
        // possession; a legitimate reacquisition (trade, waiver) after the
        // superseded pick keeps the record intact
        anomaly_fixes.retain(|fix| {
            let (player, holder) = match fix {
                AnomalyFix::Reassign { player, from_owner, .. } => (*player, from_owner),
                AnomalyFix::Drop { player, owner, .. } => (*player, owner),
            };
            tracer.trace(player, holder, target_season, as_of).kind == AcquisitionKind::Undrafted
        });
        apply_fixes(&mut candidates, &anomaly_fixes);

        // group by owner; BTreeMap keeps the report owner-ordered
        let mut by_owner: BTreeMap<OwnerId, Vec<KeeperCandidate>> = BTreeMap::new();
        for candidate in candidates {
            by_owner.entry(candidate.owner.clone()).or_default().push(candidate);
        }

        // per-roster work is independent and CPU-bound once the ledgers are
        // in memory
        let groups: Vec<(OwnerId, Vec<KeeperCandidate>)> = by_owner.into_iter().collect();
        let mut per_roster = Vec::with_capacity(groups.len());
        let mut unresolved = Vec::new();
        let results: Vec<(RosterKeeperReport, Vec<UnresolvedKeeper>)> = groups
            .par_iter()
            .map(|(owner, group)| {
                resolve_roster(
                    owner,
                    group,
                    &tracer,
                    &pick_ledger,
                    &settings,
                    target_season,
                    as_of,
                )
            })
            .collect();
        for (report, mut failed) in results {
            per_roster.push(report);
            unresolved.append(&mut failed);
        }

        partial_sync.sort_by(|a, b| a.season.cmp(&b.season));
        info!(
            "computed keepers for {} rosters ({} unresolved, {} anomaly fixes)",
            per_roster.len(),
            unresolved.len(),
            anomaly_fixes.len()
        );

        Ok(KeeperComputeReport {
            league: head.clone(),
            target_season,
            per_roster,
            unresolved,
            partial_sync,
            anomaly_fixes,
            broken_chain: chain.broken_link.clone(),
        })
    }

    /// Fetch every season's ledger. A failed league degrades to an empty
    /// ledger plus a partial-sync note; the run continues on the evidence
    /// that did load.
    async fn fetch_ledgers(&self, chain: &LeagueChain) -> (Vec<LeagueLedger>, Vec<PartialSync>) {
        let fetches = chain.seasons.iter().map(|league| async move {
            (league, self.fetch_ledger(league).await)
        });
        let mut ledgers = Vec::with_capacity(chain.seasons.len());
        let mut partial = Vec::new();
        for (league, result) in futures::future::join_all(fetches).await {
            match result {
                Ok(ledger) => ledgers.push(ledger),
                Err(e) => {
                    warn!(
                        "ledger for {} (season {}) unavailable: {}",
                        league.external_id, league.season, e
                    );
                    partial.push(PartialSync {
                        league: league.external_id.clone(),
                        season: league.season,
                        error: e.to_string(),
                    });
                    ledgers.push(LeagueLedger::empty(league.external_id.clone(), league.season));
                }
            }
        }
        (ledgers, partial)
    }

    async fn fetch_ledger(&self, league: &SeasonLeague) -> Result<LeagueLedger, SyncError> {
        let id = &league.external_id;
        let (rosters, draft_events, transactions, traded_picks) = futures::try_join!(
            self.feed.rosters(id),
            self.feed.draft_events(id),
            self.feed.transactions(id),
            self.feed.traded_picks(id),
        )?;
        Ok(LeagueLedger {
            league: id.clone(),
            season: league.season,
            rosters,
            draft_events,
            transactions,
            traded_picks,
        })
    }
}

/// Apply anomaly repairs to the candidate set before costing
fn apply_fixes(candidates: &mut Vec<KeeperCandidate>, fixes: &[AnomalyFix]) {
    for fix in fixes {
        match fix {
            AnomalyFix::Drop { player, owner, .. } => {
                candidates.retain(|c| !(c.player == *player && &c.owner == owner));
            }
            AnomalyFix::Reassign { player, from_owner, to_owner, .. } => {
                for candidate in candidates.iter_mut() {
                    if candidate.player == *player && &candidate.owner == from_owner {
                        candidate.owner = to_owner.clone();
                    }
                }
            }
        }
    }
}

/// Trace, cost, quota-check, and cascade one roster's candidates
fn resolve_roster(
    owner: &OwnerId,
    candidates: &[KeeperCandidate],
    tracer: &AcquisitionTracer<'_>,
    pick_ledger: &TradedPickLedger,
    settings: &LeagueSettings,
    target_season: Season,
    as_of: DateTime<Utc>,
) -> (RosterKeeperReport, Vec<UnresolvedKeeper>) {
    let mut unresolved = Vec::new();
    let mut costed: Vec<KeeperSelection> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let record = tracer.trace(candidate.player, owner, target_season, as_of);
        let cost = compute_cost(&record, target_season, settings);

        if candidate.kind == KeeperKind::Regular
            && eligibility(cost.years_kept, settings) == Eligibility::FranchiseOnly
        {
            unresolved.push(UnresolvedKeeper {
                owner: owner.clone(),
                player: candidate.player,
                reason: UnresolvedReason::IneligibleRegular,
            });
            continue;
        }

        costed.push(KeeperSelection {
            player: candidate.player,
            owner: owner.clone(),
            target_season,
            kind: candidate.kind,
            years_kept: cost.years_kept,
            base_cost: cost.base_cost,
            final_cost: cost.final_cost,
            locked: candidate.locked,
        });
    }

    // cheapest selections win each quota; ties break on player id so the
    // outcome never depends on input order
    costed.sort_by_key(|s| (s.final_cost, s.player));
    let mut keepers: Vec<KeeperSelection> = Vec::new();
    let mut regular = 0u32;
    let mut franchise = 0u32;
    for selection in costed {
        let (count, quota, reason) = match selection.kind {
            KeeperKind::Regular => {
                (&mut regular, settings.max_keepers, UnresolvedReason::QuotaExceeded)
            }
            KeeperKind::Franchise => (
                &mut franchise,
                settings.max_franchise_tags,
                UnresolvedReason::FranchiseQuotaExceeded,
            ),
        };
        if *count < quota {
            *count += 1;
            keepers.push(selection);
        } else {
            unresolved.push(UnresolvedKeeper {
                owner: owner.clone(),
                player: selection.player,
                reason,
            });
        }
    }

    let provisional: Vec<ProvisionalKeeper> = keepers
        .iter()
        .map(|s| ProvisionalKeeper { player: s.player, round: s.final_cost })
        .collect();
    let owned = pick_ledger.owned_rounds(owner, target_season, settings.total_rounds);
    let cascade = resolve(&provisional, &owned, settings.total_rounds);

    for outcome in &cascade {
        if outcome.assigned_round.is_none() {
            unresolved.push(UnresolvedKeeper {
                owner: owner.clone(),
                player: outcome.player,
                reason: UnresolvedReason::NoOpenRound,
            });
        }
    }

    let board = DraftBoard::build(settings.total_rounds, &owned, &cascade);

    keepers.sort_by_key(|s| s.player);
    unresolved.sort_by(|a, b| a.player.cmp(&b.player));

    (RosterKeeperReport { owner: owner.clone(), keepers, cascade, board }, unresolved)
}
