use keeper_core::{LeagueId, LeagueSettings};

/// Read-only source of per-league keeper rules
pub trait LeagueSettingsStore: Send + Sync {
    fn settings(&self, league: &LeagueId) -> Option<LeagueSettings>;
}

/// One fixed settings record for every league; the common case for a
/// single-league deployment and for tests
pub struct StaticSettings {
    settings: LeagueSettings,
}

impl StaticSettings {
    pub fn new(settings: LeagueSettings) -> Self {
        Self { settings }
    }
}

impl LeagueSettingsStore for StaticSettings {
    fn settings(&self, _league: &LeagueId) -> Option<LeagueSettings> {
        Some(self.settings.clone())
    }
}
