//! Redraft-anomaly resolution.
//!
//! A provider defect produces multiple draft picks for the same player within
//! one draft event (drafted, dropped, re-drafted), with the keeper-origin
//! flag always bound to the first pick. The pick with the highest pick number
//! is authoritative for ownership; keeper records on superseded rosters are
//! reassigned to the final pick's roster, or dropped when a correct record
//! already exists there.

use std::collections::HashMap;

use keeper_core::{DraftEvent, DraftPick, OwnerId, PlayerId, Season};
use league_history::RosterContinuity;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One keeper-record repair emitted by anomaly resolution. Never surfaced as
/// an error; the engine applies these to the candidate set before costing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyFix {
    Reassign { player: PlayerId, season: Season, from_owner: OwnerId, to_owner: OwnerId },
    Drop { player: PlayerId, season: Season, owner: OwnerId },
}

/// Picks of one event with superseded duplicates removed: for every player
/// appearing on more than one pick, only the highest pick number survives.
pub fn authoritative_picks(event: &DraftEvent) -> Vec<&DraftPick> {
    let mut last_pick_for: HashMap<PlayerId, u32> = HashMap::new();
    for pick in &event.picks {
        if let Some(player) = pick.player {
            let entry = last_pick_for.entry(player).or_insert(pick.pick_number);
            if pick.pick_number > *entry {
                *entry = pick.pick_number;
            }
        }
    }

    event
        .picks
        .iter()
        .filter(|pick| match pick.player {
            Some(player) => last_pick_for.get(&player) == Some(&pick.pick_number),
            None => true,
        })
        .collect()
}

/// Keeper-record ownership held by `owner` for `player`, as seen in the
/// candidate set the engine is about to cost
pub trait KeeperRecordView {
    fn has_record(&self, owner: &OwnerId, player: PlayerId) -> bool;
}

impl KeeperRecordView for Vec<(OwnerId, PlayerId)> {
    fn has_record(&self, owner: &OwnerId, player: PlayerId) -> bool {
        self.iter().any(|(o, p)| o == owner && *p == player)
    }
}

/// Scan draft events for redraft anomalies and emit the keeper-record fixes
/// they require against the current candidate set.
pub fn resolve_keeper_anomalies<V: KeeperRecordView>(
    events: &[DraftEvent],
    continuity: &RosterContinuity,
    records: &V,
) -> Vec<AnomalyFix> {
    let mut fixes = Vec::new();

    for event in events {
        let mut picks_for: HashMap<PlayerId, Vec<&DraftPick>> = HashMap::new();
        for pick in &event.picks {
            if let Some(player) = pick.player {
                picks_for.entry(player).or_default().push(pick);
            }
        }

        for (player, mut picks) in picks_for {
            if picks.len() < 2 {
                continue;
            }
            picks.sort_by_key(|p| p.pick_number);
            let authoritative = picks.last().expect("len >= 2");

            let Some(final_owner) = continuity.owner_of(event.season, authoritative.roster) else {
                warn!(
                    "season {}: redrafted player {} final pick roster {} has no owner, cannot repair",
                    event.season, player, authoritative.roster
                );
                continue;
            };

            info!(
                "season {}: player {} drafted {} times, pick {} (roster {}) is authoritative",
                event.season,
                player,
                picks.len(),
                authoritative.pick_number,
                authoritative.roster
            );

            for superseded in &picks[..picks.len() - 1] {
                let Some(stale_owner) = continuity.owner_of(event.season, superseded.roster) else {
                    continue;
                };
                if stale_owner == final_owner || !records.has_record(stale_owner, player) {
                    continue;
                }
                let fix = if records.has_record(final_owner, player) {
                    AnomalyFix::Drop {
                        player,
                        season: event.season,
                        owner: stale_owner.clone(),
                    }
                } else {
                    AnomalyFix::Reassign {
                        player,
                        season: event.season,
                        from_owner: stale_owner.clone(),
                        to_owner: final_owner.clone(),
                    }
                };
                fixes.push(fix);
            }
        }
    }

    // deterministic output order regardless of hash iteration
    fixes.sort_by(|a, b| {
        let key = |f: &AnomalyFix| match f {
            AnomalyFix::Reassign { player, season, from_owner, .. }
            | AnomalyFix::Drop { player, season, owner: from_owner } => {
                (*season, *player, from_owner.clone())
            }
        };
        key(a).cmp(&key(b))
    });
    fixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_core::RosterSlot;

    fn pick(round: u32, number: u32, player: u64, roster: u32, reserved: bool) -> DraftPick {
        DraftPick {
            round,
            pick_number: number,
            slot: number,
            player: Some(player),
            roster,
            keeper_reserved: reserved,
        }
    }

    fn continuity_for(season: Season, owners: &[(u32, &str)]) -> RosterContinuity {
        let mut continuity = RosterContinuity::new();
        let slots: Vec<RosterSlot> = owners
            .iter()
            .map(|(roster_id, owner)| RosterSlot {
                roster_id: *roster_id,
                owner: Some(owner.to_string()),
            })
            .collect();
        continuity.register_season(season, &slots);
        continuity
    }

    #[test]
    fn highest_pick_number_wins_ownership() {
        let event = DraftEvent {
            league: "lg".to_string(),
            season: 2024,
            picks: vec![
                pick(1, 12, 77, 1, true),
                pick(4, 45, 77, 2, false),
                pick(14, 201, 77, 3, false),
                pick(2, 20, 88, 1, false),
            ],
        };

        let picks = authoritative_picks(&event);
        let for_player: Vec<u32> =
            picks.iter().filter(|p| p.player == Some(77)).map(|p| p.pick_number).collect();
        assert_eq!(for_player, vec![201]);
        // unrelated players untouched
        assert!(picks.iter().any(|p| p.player == Some(88)));
    }

    #[test]
    fn stale_keeper_record_is_reassigned_to_final_roster() {
        let event = DraftEvent {
            league: "lg".to_string(),
            season: 2024,
            picks: vec![pick(1, 12, 77, 1, true), pick(4, 45, 77, 2, false), pick(14, 201, 77, 3, false)],
        };
        let continuity = continuity_for(2024, &[(1, "a"), (2, "b"), (3, "c")]);
        let records = vec![("a".to_string(), 77u64)];

        let fixes = resolve_keeper_anomalies(&[event], &continuity, &records);
        assert_eq!(
            fixes,
            vec![AnomalyFix::Reassign {
                player: 77,
                season: 2024,
                from_owner: "a".to_string(),
                to_owner: "c".to_string(),
            }]
        );
    }

    #[test]
    fn stale_record_is_dropped_when_final_roster_already_has_one() {
        let event = DraftEvent {
            league: "lg".to_string(),
            season: 2024,
            picks: vec![pick(1, 12, 77, 1, true), pick(14, 201, 77, 3, false)],
        };
        let continuity = continuity_for(2024, &[(1, "a"), (3, "c")]);
        let records = vec![("a".to_string(), 77u64), ("c".to_string(), 77u64)];

        let fixes = resolve_keeper_anomalies(&[event], &continuity, &records);
        assert_eq!(
            fixes,
            vec![AnomalyFix::Drop { player: 77, season: 2024, owner: "a".to_string() }]
        );
    }

    #[test]
    fn single_pick_events_emit_nothing() {
        let event = DraftEvent {
            league: "lg".to_string(),
            season: 2024,
            picks: vec![pick(1, 1, 10, 1, false), pick(1, 2, 11, 2, false)],
        };
        let continuity = continuity_for(2024, &[(1, "a"), (2, "b")]);
        let records: Vec<(OwnerId, PlayerId)> = vec![];
        assert!(resolve_keeper_anomalies(&[event], &continuity, &records).is_empty());
    }
}
