use std::collections::{BTreeMap, BTreeSet};

use keeper_core::{PlayerId, Round};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A keeper claim entering resolution: the round is the computed final cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalKeeper {
    pub player: PlayerId,
    pub round: Round,
}

/// Why a keeper moved off its claimed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeReason {
    /// A cheaper keeper (or equal cost with lower player id) held the round
    RoundContested,

    /// The roster traded the claimed round away
    RoundNotOwned,
}

/// Final placement of one keeper claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub player: PlayerId,

    /// The round the keeper originally claimed (its final cost)
    pub original_round: Round,

    /// Where the keeper landed; `None` means unresolved (no open round)
    pub assigned_round: Option<Round>,

    pub cascaded: bool,
    pub reason: Option<CascadeReason>,
}

/// Place every keeper claim on the roster's owned rounds.
///
/// Priority order is (final cost ascending, player id ascending), which makes
/// repeated runs deterministic. Each keeper takes its claimed round when the
/// roster owns it and no higher-priority keeper occupies it; otherwise it
/// scans upward through owned rounds. Results are returned sorted by player
/// id.
pub fn resolve(
    keepers: &[ProvisionalKeeper],
    owned: &BTreeSet<Round>,
    total_rounds: Round,
) -> Vec<CascadeOutcome> {
    let mut ordered: Vec<ProvisionalKeeper> = keepers.to_vec();
    ordered.sort_by_key(|k| (k.round, k.player));

    let mut occupied: BTreeMap<Round, PlayerId> = BTreeMap::new();
    let mut outcomes = Vec::with_capacity(ordered.len());

    for keeper in &ordered {
        let claimed = keeper.round.min(total_rounds);
        let round_owned = owned.contains(&claimed);

        let assigned = if round_owned && !occupied.contains_key(&claimed) {
            Some(claimed)
        } else {
            // upward scan only; a lower round being open never pulls a
            // keeper down
            ((claimed + 1)..=total_rounds)
                .find(|r| owned.contains(r) && !occupied.contains_key(r))
        };

        let outcome = match assigned {
            Some(round) => {
                occupied.insert(round, keeper.player);
                let cascaded = round != claimed;
                let reason = if !cascaded {
                    None
                } else if round_owned {
                    Some(CascadeReason::RoundContested)
                } else {
                    Some(CascadeReason::RoundNotOwned)
                };
                if cascaded {
                    debug!(
                        "keeper {} cascaded from round {} to round {}",
                        keeper.player, claimed, round
                    );
                }
                CascadeOutcome {
                    player: keeper.player,
                    original_round: keeper.round,
                    assigned_round: Some(round),
                    cascaded,
                    reason,
                }
            }
            None => CascadeOutcome {
                player: keeper.player,
                original_round: keeper.round,
                assigned_round: None,
                cascaded: false,
                reason: None,
            },
        };
        outcomes.push(outcome);
    }

    outcomes.sort_by_key(|o| o.player);
    outcomes
}
