//! Reporter configuration and the two-tier delay policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use chainpulse_core::state::SyncState;

/// Configuration for a progress reporter instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Polling delay while actively catching up (seconds).
    pub short_delay_secs: u64,
    /// Polling delay once synced or stalled (seconds).
    pub long_delay_secs: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            short_delay_secs: 30,
            long_delay_secs: 300,
        }
    }
}

/// The reporter's two polling cadences.
///
/// While actively catching up the reporter polls and logs frequently for
/// responsive visibility; once caught up or stalled it backs off, since
/// the state is unlikely to change quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayTier {
    /// Frequent polling while syncing.
    Short,
    /// Backed-off polling once synced or stalled.
    Long,
}

impl DelayTier {
    /// The tier to use after a window evaluated to `state`.
    pub fn for_state(state: &SyncState) -> Self {
        match state {
            SyncState::Syncing(_) => Self::Short,
            SyncState::Synced | SyncState::NotSyncing => Self::Long,
        }
    }

    /// Concrete duration of this tier under `config`.
    pub fn duration(self, config: &ReporterConfig) -> Duration {
        match self {
            Self::Short => Duration::from_secs(config.short_delay_secs),
            Self::Long => Duration::from_secs(config.long_delay_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delays() {
        let config = ReporterConfig::default();
        assert_eq!(DelayTier::Short.duration(&config), Duration::from_secs(30));
        assert_eq!(DelayTier::Long.duration(&config), Duration::from_secs(300));
    }

    #[test]
    fn tier_for_state() {
        assert_eq!(DelayTier::for_state(&SyncState::Syncing(42.0)), DelayTier::Short);
        assert_eq!(DelayTier::for_state(&SyncState::Synced), DelayTier::Long);
        assert_eq!(DelayTier::for_state(&SyncState::NotSyncing), DelayTier::Long);
    }
}
