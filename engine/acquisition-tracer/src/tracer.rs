use std::collections::HashSet;

use chrono::{DateTime, Utc};
use keeper_core::{
    DraftPick, OffseasonWindow, OwnerId, PlayerId, PlayerMovement, Season, TradeTiming,
    TransactionKind, TransactionRecord,
};
use tracing::{debug, warn};

use crate::anomaly::authoritative_picks;
use crate::ledger_set::LedgerSet;
use crate::record::{AcquisitionKind, AcquisitionRecord};

/// Walks draft and transaction evidence to find how a roster acquired a
/// player. The trade-chain walk is an explicit loop over a worklist of
/// owners with a visited set, so cyclic trade histories terminate with
/// bounded stack depth.
pub struct AcquisitionTracer<'a> {
    ledgers: &'a LedgerSet<'a>,
    window: OffseasonWindow,
}

impl<'a> AcquisitionTracer<'a> {
    pub fn new(ledgers: &'a LedgerSet<'a>, window: OffseasonWindow) -> Self {
        Self { ledgers, window }
    }

    /// Trace the acquisition of `player` by `owner` ahead of `target_season`.
    ///
    /// `as_of` bounds the evidence considered; classification never reads the
    /// ambient clock. Always returns a record: missing evidence degrades to
    /// the undrafted fallback, never an error.
    pub fn trace(
        &self,
        player: PlayerId,
        owner: &OwnerId,
        target_season: Season,
        as_of: DateTime<Utc>,
    ) -> AcquisitionRecord {
        // the player is fixed for the whole trace, so the (player, roster)
        // visited set reduces to a set of owners
        let mut visited: HashSet<OwnerId> = HashSet::new();
        // transactions already consumed by the walk; guarantees progress even
        // when a hop does not move the timestamp bound (same-instant events)
        let mut spent_txns: HashSet<u64> = HashSet::new();
        let mut current = owner.clone();

        // evidence bounds: drafts up to this season, transactions up to this
        // (timestamp, excluded id); tightened at every unwound hop
        let mut season_bound = target_season - 1;
        let mut txn_bound: Option<(DateTime<Utc>, u64)> = None;

        let mut reset_season: Option<Season> = None;
        let mut entry_kind: Option<AcquisitionKind> = None;
        let mut last_evidence_season = target_season;

        loop {
            visited.insert(current.clone());

            if let Some((draft_season, pick)) = self.earliest_pick(player, &current, season_bound) {
                debug!(
                    "player {}: draft evidence for {} in {} (round {}, pick {})",
                    player, current, draft_season, pick.round, pick.pick_number
                );
                return AcquisitionRecord {
                    origin_season: reset_season.unwrap_or(draft_season),
                    draft_round: Some(pick.round),
                    kind: entry_kind.unwrap_or(AcquisitionKind::Drafted),
                };
            }

            let Some((txn, movement)) =
                self.acquiring_transaction(player, &current, as_of, txn_bound, &spent_txns)
            else {
                return match entry_kind {
                    None => {
                        warn!(
                            "no draft or transaction evidence for player {} on {}, treating as undrafted in {}",
                            player, current, target_season
                        );
                        AcquisitionRecord {
                            origin_season: target_season,
                            draft_round: None,
                            kind: AcquisitionKind::Undrafted,
                        }
                    }
                    Some(kind) => {
                        warn!(
                            "lineage of player {} bottoms out at {} without draft evidence",
                            player, current
                        );
                        AcquisitionRecord {
                            origin_season: reset_season.unwrap_or(last_evidence_season),
                            draft_round: None,
                            kind,
                        }
                    }
                };
            };

            spent_txns.insert(txn.id);
            last_evidence_season = txn.season;
            let kind = *entry_kind.get_or_insert(match txn.kind {
                TransactionKind::Trade => AcquisitionKind::Traded,
                TransactionKind::Waiver => AcquisitionKind::Waiver,
                TransactionKind::FreeAgent => AcquisitionKind::FreeAgent,
                TransactionKind::Commissioner => AcquisitionKind::Commissioner,
            });

            match txn.kind {
                TransactionKind::Trade | TransactionKind::Commissioner => {
                    // commissioner moves carry lineage but never reset the clock
                    if txn.kind == TransactionKind::Trade {
                        if let TradeTiming::Offseason { target_season: reset_at } =
                            self.window.classify(txn.timestamp)
                        {
                            reset_season.get_or_insert(reset_at);
                        }
                    }

                    let loser = movement
                        .from_roster
                        .and_then(|r| self.ledgers.continuity().owner_of(txn.season, r))
                        .cloned();

                    match loser {
                        Some(loser) if !visited.contains(&loser) => {
                            current = loser;
                            season_bound = self.window.active_season_at(txn.timestamp);
                            txn_bound = Some((txn.timestamp, txn.id));
                        }
                        Some(loser) => {
                            debug!(
                                "trade chain for player {} revisits {}, terminating at season {}",
                                player, loser, txn.season
                            );
                            return AcquisitionRecord {
                                origin_season: reset_season.unwrap_or(txn.season),
                                draft_round: None,
                                kind,
                            };
                        }
                        None => {
                            warn!(
                                "transaction {} moves player {} without a resolvable losing side",
                                txn.id, player
                            );
                            return AcquisitionRecord {
                                origin_season: reset_season.unwrap_or(txn.season),
                                draft_round: None,
                                kind,
                            };
                        }
                    }
                }
                TransactionKind::Waiver | TransactionKind::FreeAgent => {
                    match self.drop_before(
                        player,
                        &current,
                        txn.season,
                        txn.timestamp,
                        txn.id,
                        &spent_txns,
                    ) {
                        Some(drop_txn) => {
                            // same roster dropped the player earlier this
                            // season: uninterrupted continuation, keep
                            // looking for how they held the player before
                            debug!(
                                "player {} re-added by {} after same-season drop, continuing lineage",
                                player, current
                            );
                            spent_txns.insert(drop_txn.id);
                            season_bound = txn.season;
                            txn_bound = Some((drop_txn.timestamp, drop_txn.id));
                        }
                        None => {
                            return AcquisitionRecord {
                                origin_season: reset_season.unwrap_or(txn.season),
                                draft_round: None,
                                kind,
                            };
                        }
                    }
                }
            }
        }
    }

    /// Earliest authoritative, non-keeper-reserved pick of `player` by
    /// `owner` in any season up to `season_bound`
    fn earliest_pick(
        &self,
        player: PlayerId,
        owner: &OwnerId,
        season_bound: Season,
    ) -> Option<(Season, &'a DraftPick)> {
        for ledger in self.ledgers.oldest_first() {
            if ledger.season > season_bound {
                break;
            }
            let mut found: Option<&DraftPick> = None;
            for event in &ledger.draft_events {
                for pick in authoritative_picks(event) {
                    if pick.player != Some(player) || pick.keeper_reserved {
                        continue;
                    }
                    if self.ledgers.continuity().owner_of(event.season, pick.roster) != Some(owner) {
                        continue;
                    }
                    if found.map_or(true, |f| pick.pick_number < f.pick_number) {
                        found = Some(pick);
                    }
                }
            }
            if let Some(pick) = found {
                return Some((ledger.season, pick));
            }
        }
        None
    }

    /// Most recent transaction moving `player` onto `owner`, bounded by
    /// `as_of` and, when unwinding a hop, by the hop's (timestamp, id).
    /// Transactions already consumed by the walk are never re-selected.
    fn acquiring_transaction(
        &self,
        player: PlayerId,
        owner: &OwnerId,
        as_of: DateTime<Utc>,
        txn_bound: Option<(DateTime<Utc>, u64)>,
        spent: &HashSet<u64>,
    ) -> Option<(&'a TransactionRecord, &'a PlayerMovement)> {
        let mut best: Option<(&TransactionRecord, &PlayerMovement)> = None;

        for ledger in self.ledgers.oldest_first() {
            for txn in &ledger.transactions {
                if txn.timestamp > as_of || spent.contains(&txn.id) {
                    continue;
                }
                if let Some((bound_ts, bound_id)) = txn_bound {
                    // same-instant transactions are distinguished by id, so
                    // batched trade chains still unwind
                    let earlier = txn.timestamp < bound_ts
                        || (txn.timestamp == bound_ts && txn.id != bound_id);
                    if !earlier {
                        continue;
                    }
                }
                let Some(movement) = txn.movements.iter().find(|m| {
                    m.player == player
                        && m.to_roster
                            .and_then(|r| self.ledgers.continuity().owner_of(txn.season, r))
                            == Some(owner)
                }) else {
                    continue;
                };
                let newer = best
                    .map_or(true, |(b, _)| (txn.timestamp, txn.id) > (b.timestamp, b.id));
                if newer {
                    best = Some((txn, movement));
                }
            }
        }

        best
    }

    /// Most recent drop of `player` by `owner` in `season` before the given
    /// transaction
    fn drop_before(
        &self,
        player: PlayerId,
        owner: &OwnerId,
        season: Season,
        before_ts: DateTime<Utc>,
        exclude_id: u64,
        spent: &HashSet<u64>,
    ) -> Option<&'a TransactionRecord> {
        let ledger = self.ledgers.ledger(season)?;
        ledger
            .transactions
            .iter()
            .filter(|txn| {
                txn.season == season
                    && !spent.contains(&txn.id)
                    && (txn.timestamp < before_ts
                        || (txn.timestamp == before_ts && txn.id != exclude_id))
                    && txn.movements.iter().any(|m| {
                        m.player == player
                            && m.to_roster.is_none()
                            && m.from_roster
                                .and_then(|r| self.ledgers.continuity().owner_of(season, r))
                                == Some(owner)
                    })
            })
            .max_by_key(|txn| (txn.timestamp, txn.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use keeper_core::{DraftEvent, LeagueLedger, RosterSlot};
    use league_history::RosterContinuity;

    const PLAYER: PlayerId = 4040;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 18, 0, 0).unwrap()
    }

    fn pick(round: u32, number: u32, roster: u32, reserved: bool) -> DraftPick {
        DraftPick {
            round,
            pick_number: number,
            slot: number,
            player: Some(PLAYER),
            roster,
            keeper_reserved: reserved,
        }
    }

    fn trade(id: u64, season: Season, at: DateTime<Utc>, from: u32, to: u32) -> TransactionRecord {
        TransactionRecord {
            id,
            kind: TransactionKind::Trade,
            timestamp: at,
            season,
            movements: vec![PlayerMovement {
                player: PLAYER,
                from_roster: Some(from),
                to_roster: Some(to),
            }],
        }
    }

    /// Three-season chain: owners x/y/z hold rosters 1/2/3 every season.
    struct Fixture {
        ledgers: Vec<LeagueLedger>,
        continuity: RosterContinuity,
    }

    impl Fixture {
        fn new() -> Self {
            let mut continuity = RosterContinuity::new();
            let mut ledgers = Vec::new();
            for season in [2023, 2024, 2025] {
                let slots: Vec<RosterSlot> = [("x", 1u32), ("y", 2), ("z", 3)]
                    .iter()
                    .map(|(owner, roster_id)| RosterSlot {
                        roster_id: *roster_id,
                        owner: Some(owner.to_string()),
                    })
                    .collect();
                continuity.register_season(season, &slots);
                ledgers.push(LeagueLedger::empty(format!("lg-{season}"), season));
            }
            Self { ledgers, continuity }
        }

        fn ledger_mut(&mut self, season: Season) -> &mut LeagueLedger {
            self.ledgers.iter_mut().find(|l| l.season == season).unwrap()
        }

        fn draft(&mut self, season: Season, picks: Vec<DraftPick>) {
            let league = format!("lg-{season}");
            self.ledger_mut(season).draft_events.push(DraftEvent { league, season, picks });
        }

        fn txn(&mut self, txn: TransactionRecord) {
            self.ledger_mut(txn.season).transactions.push(txn);
        }

        fn trace(&self, owner: &str, target: Season) -> AcquisitionRecord {
            let set = LedgerSet::new(self.ledgers.iter(), &self.continuity);
            let tracer = AcquisitionTracer::new(&set, OffseasonWindow::default());
            tracer.trace(PLAYER, &owner.to_string(), target, ts(target, 8, 1))
        }
    }

    #[test]
    fn direct_draft_is_the_origin() {
        let mut fx = Fixture::new();
        fx.draft(2023, vec![pick(4, 40, 1, false)]);

        let record = fx.trace("x", 2025);
        assert_eq!(
            record,
            AcquisitionRecord {
                origin_season: 2023,
                draft_round: Some(4),
                kind: AcquisitionKind::Drafted,
            }
        );
    }

    #[test]
    fn keeper_reserved_pick_is_not_evidence() {
        let mut fx = Fixture::new();
        // the only pick is a keeper-reserved slot; it must not count as a
        // draft acquisition
        fx.draft(2024, vec![pick(2, 15, 1, true)]);

        let record = fx.trace("x", 2025);
        assert_eq!(record.kind, AcquisitionKind::Undrafted);
        assert_eq!(record.origin_season, 2025);
    }

    #[test]
    fn offseason_trade_resets_clock_but_keeps_round() {
        let mut fx = Fixture::new();
        fx.draft(2023, vec![pick(4, 40, 1, false)]);
        fx.txn(trade(100, 2025, ts(2025, 2, 10), 1, 2));

        let record = fx.trace("y", 2025);
        assert_eq!(
            record,
            AcquisitionRecord {
                origin_season: 2025,
                draft_round: Some(4),
                kind: AcquisitionKind::Traded,
            }
        );
    }

    #[test]
    fn in_season_trade_preserves_origin() {
        let mut fx = Fixture::new();
        fx.draft(2023, vec![pick(4, 40, 1, false)]);
        fx.txn(trade(100, 2024, ts(2024, 10, 15), 1, 2));

        let record = fx.trace("y", 2025);
        assert_eq!(
            record,
            AcquisitionRecord {
                origin_season: 2023,
                draft_round: Some(4),
                kind: AcquisitionKind::Traded,
            }
        );
    }

    #[test]
    fn same_season_drop_and_readd_is_a_continuation() {
        let mut fx = Fixture::new();
        // y drafted the player in 2023 and traded him to x in season; x then
        // dropped and re-claimed him off waivers within 2024
        fx.draft(2023, vec![pick(6, 61, 2, false)]);
        fx.txn(trade(199, 2024, ts(2024, 9, 20), 2, 1));
        fx.txn(TransactionRecord {
            id: 200,
            kind: TransactionKind::FreeAgent,
            timestamp: ts(2024, 10, 1),
            season: 2024,
            movements: vec![PlayerMovement {
                player: PLAYER,
                from_roster: Some(1),
                to_roster: None,
            }],
        });
        fx.txn(TransactionRecord {
            id: 201,
            kind: TransactionKind::Waiver,
            timestamp: ts(2024, 10, 20),
            season: 2024,
            movements: vec![PlayerMovement {
                player: PLAYER,
                from_roster: None,
                to_roster: Some(1),
            }],
        });

        // continuation: the waiver re-add does not restart the clock; the
        // lineage runs back through the in-season trade to the 2023 draft
        let record = fx.trace("x", 2025);
        assert_eq!(record.origin_season, 2023);
        assert_eq!(record.draft_round, Some(6));
        assert_eq!(record.kind, AcquisitionKind::Waiver);
    }

    #[test]
    fn fresh_waiver_add_is_undrafted_lineage() {
        let mut fx = Fixture::new();
        fx.txn(TransactionRecord {
            id: 300,
            kind: TransactionKind::Waiver,
            timestamp: ts(2024, 10, 5),
            season: 2024,
            movements: vec![PlayerMovement {
                player: PLAYER,
                from_roster: None,
                to_roster: Some(2),
            }],
        });

        let record = fx.trace("y", 2025);
        assert_eq!(
            record,
            AcquisitionRecord {
                origin_season: 2024,
                draft_round: None,
                kind: AcquisitionKind::Waiver,
            }
        );
    }

    #[test]
    fn same_instant_drop_and_readd_terminates() {
        let mut fx = Fixture::new();
        let at = ts(2024, 10, 10);
        // provider recorded the drop and the waiver re-add at the same instant
        fx.txn(TransactionRecord {
            id: 600,
            kind: TransactionKind::FreeAgent,
            timestamp: at,
            season: 2024,
            movements: vec![PlayerMovement {
                player: PLAYER,
                from_roster: Some(1),
                to_roster: None,
            }],
        });
        fx.txn(TransactionRecord {
            id: 601,
            kind: TransactionKind::Waiver,
            timestamp: at,
            season: 2024,
            movements: vec![PlayerMovement {
                player: PLAYER,
                from_roster: None,
                to_roster: Some(1),
            }],
        });

        let record = fx.trace("x", 2025);
        assert_eq!(record.origin_season, 2024);
        assert_eq!(record.draft_round, None);
        assert_eq!(record.kind, AcquisitionKind::Waiver);
    }

    #[test]
    fn trade_cycle_with_identical_timestamps_terminates() {
        let mut fx = Fixture::new();
        let at = ts(2024, 10, 10);
        fx.txn(trade(400, 2024, at, 1, 2)); // x -> y
        fx.txn(trade(401, 2024, at, 2, 1)); // y -> x

        let record = fx.trace("x", 2025);
        assert_eq!(record.origin_season, 2024);
        assert_eq!(record.kind, AcquisitionKind::Traded);
    }

    #[test]
    fn no_evidence_falls_back_to_undrafted_in_target_season() {
        let fx = Fixture::new();
        let record = fx.trace("z", 2025);
        assert_eq!(
            record,
            AcquisitionRecord {
                origin_season: 2025,
                draft_round: None,
                kind: AcquisitionKind::Undrafted,
            }
        );
    }

    #[test]
    fn redraft_anomaly_resolves_to_final_pick_owner() {
        let mut fx = Fixture::new();
        // drafted by x (flagged keeper origin), re-drafted by y, finally by z
        fx.draft(
            2024,
            vec![
                DraftPick {
                    round: 1,
                    pick_number: 12,
                    slot: 12,
                    player: Some(PLAYER),
                    roster: 1,
                    keeper_reserved: true,
                },
                pick(4, 45, 2, false),
                pick(14, 201, 3, false),
            ],
        );

        let for_z = fx.trace("z", 2025);
        assert_eq!(for_z.origin_season, 2024);
        assert_eq!(for_z.draft_round, Some(14));
        assert_eq!(for_z.kind, AcquisitionKind::Drafted);

        // the superseded rosters hold no draft evidence at all
        let for_y = fx.trace("y", 2025);
        assert_eq!(for_y.kind, AcquisitionKind::Undrafted);
    }

    #[test]
    fn two_hop_trade_chain_traces_to_original_draft() {
        let mut fx = Fixture::new();
        fx.draft(2023, vec![pick(3, 30, 1, false)]);
        fx.txn(trade(500, 2023, ts(2023, 10, 1), 1, 2)); // x -> y, in season
        fx.txn(trade(501, 2024, ts(2024, 10, 1), 2, 3)); // y -> z, in season

        let record = fx.trace("z", 2025);
        assert_eq!(
            record,
            AcquisitionRecord {
                origin_season: 2023,
                draft_round: Some(3),
                kind: AcquisitionKind::Traded,
            }
        );
    }
}
