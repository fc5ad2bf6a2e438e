use std::collections::{BTreeMap, HashMap};

use keeper_core::{OwnerId, RosterId, RosterSlot, Season};
use tracing::warn;

/// Stable franchise identity across seasons.
///
/// Maps each external owner id to its season-local roster row per season, and
/// the reverse. Built once per chain; read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct RosterContinuity {
    by_owner: BTreeMap<OwnerId, BTreeMap<Season, RosterId>>,
    by_roster: HashMap<(Season, RosterId), OwnerId>,
}

impl RosterContinuity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one season's roster rows. Slots with no owner mapping are
    /// skipped and logged.
    pub fn register_season(&mut self, season: Season, slots: &[RosterSlot]) {
        for slot in slots {
            match &slot.owner {
                Some(owner) => {
                    self.by_owner
                        .entry(owner.clone())
                        .or_default()
                        .insert(season, slot.roster_id);
                    self.by_roster.insert((season, slot.roster_id), owner.clone());
                }
                None => {
                    warn!("season {} roster {} has no owner mapping, skipping", season, slot.roster_id);
                }
            }
        }
    }

    /// Owner of a season-local roster row
    pub fn owner_of(&self, season: Season, roster_id: RosterId) -> Option<&OwnerId> {
        self.by_roster.get(&(season, roster_id))
    }

    /// Season-local roster row for an owner, if they were in the league
    pub fn roster_of(&self, owner: &OwnerId, season: Season) -> Option<RosterId> {
        self.by_owner.get(owner).and_then(|seasons| seasons.get(&season)).copied()
    }

    /// All owners seen anywhere in the chain, in stable order
    pub fn owners(&self) -> impl Iterator<Item = &OwnerId> {
        self.by_owner.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_owner_across_seasons_is_one_franchise() {
        let mut continuity = RosterContinuity::new();
        continuity.register_season(
            2023,
            &[RosterSlot { roster_id: 4, owner: Some("owner-a".to_string()) }],
        );
        continuity.register_season(
            2024,
            &[RosterSlot { roster_id: 9, owner: Some("owner-a".to_string()) }],
        );

        assert_eq!(continuity.roster_of(&"owner-a".to_string(), 2023), Some(4));
        assert_eq!(continuity.roster_of(&"owner-a".to_string(), 2024), Some(9));
        assert_eq!(continuity.owner_of(2024, 9), Some(&"owner-a".to_string()));
    }

    #[test]
    fn unowned_slot_is_skipped() {
        let mut continuity = RosterContinuity::new();
        continuity.register_season(2024, &[RosterSlot { roster_id: 2, owner: None }]);
        assert_eq!(continuity.owner_of(2024, 2), None);
        assert_eq!(continuity.owners().count(), 0);
    }
}
