use std::collections::{BTreeMap, BTreeSet};

use keeper_core::{PlayerId, Round};
use serde::{Deserialize, Serialize};

use crate::resolver::CascadeOutcome;

/// State of one draft round on a roster's board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Round is owned and open
    Available,

    /// Round is filled by a resolved keeper
    Keeper(PlayerId),

    /// Round was traded away
    Traded,
}

/// Round-by-round read model of one roster's draft, derived purely from
/// cascade output. Presentation layers consume this; they never compute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftBoard {
    slots: BTreeMap<Round, SlotStatus>,
}

impl DraftBoard {
    /// Build the full board for one roster
    pub fn build(
        total_rounds: Round,
        owned: &BTreeSet<Round>,
        outcomes: &[CascadeOutcome],
    ) -> Self {
        let mut slots: BTreeMap<Round, SlotStatus> = (1..=total_rounds)
            .map(|round| {
                let status =
                    if owned.contains(&round) { SlotStatus::Available } else { SlotStatus::Traded };
                (round, status)
            })
            .collect();

        for outcome in outcomes {
            if let Some(round) = outcome.assigned_round {
                slots.insert(round, SlotStatus::Keeper(outcome.player));
            }
        }

        Self { slots }
    }

    pub fn status(&self, round: Round) -> Option<SlotStatus> {
        self.slots.get(&round).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Round, SlotStatus)> + '_ {
        self.slots.iter().map(|(round, status)| (*round, *status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_reflects_traded_keeper_and_open_slots() {
        let owned: BTreeSet<Round> = [1, 3, 4].into_iter().collect();
        let outcomes = vec![CascadeOutcome {
            player: 9,
            original_round: 3,
            assigned_round: Some(3),
            cascaded: false,
            reason: None,
        }];

        let board = DraftBoard::build(4, &owned, &outcomes);
        assert_eq!(board.status(1), Some(SlotStatus::Available));
        assert_eq!(board.status(2), Some(SlotStatus::Traded));
        assert_eq!(board.status(3), Some(SlotStatus::Keeper(9)));
        assert_eq!(board.status(4), Some(SlotStatus::Available));
        assert_eq!(board.iter().count(), 4);
    }

    #[test]
    fn unresolved_keepers_leave_the_board_unchanged() {
        let owned: BTreeSet<Round> = [1].into_iter().collect();
        let outcomes = vec![CascadeOutcome {
            player: 9,
            original_round: 1,
            assigned_round: None,
            cascaded: false,
            reason: None,
        }];

        let board = DraftBoard::build(2, &owned, &outcomes);
        assert_eq!(board.status(1), Some(SlotStatus::Available));
        assert_eq!(board.status(2), Some(SlotStatus::Traded));
    }
}
