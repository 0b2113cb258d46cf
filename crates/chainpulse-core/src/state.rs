//! Sync-state classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats::IntervalStats;

/// Slot distance to the node tip under which the indexer counts as synced.
pub const SYNCED_SLOT_THRESHOLD: u64 = 100;

/// The indexer's sync state relative to the followed node.
///
/// Derived fresh from each window's [`IntervalStats`]; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SyncState {
    /// Within [`SYNCED_SLOT_THRESHOLD`] slots of the node tip.
    Synced,
    /// Catching up; payload is percent complete in `[0, 100]`.
    Syncing(f64),
    /// No node tip observed — progress cannot be judged.
    NotSyncing,
}

impl SyncState {
    /// Classify one window's statistics.
    ///
    /// The percentage assumes the node's reported slot approximates its
    /// true final tip; when both endpoints start near genesis the ratio
    /// is not meaningful. Known limitation, kept as-is.
    pub fn evaluate(stats: &IntervalStats) -> Self {
        let node_slot = match stats.node_point.slot() {
            None => return Self::NotSyncing,
            Some(slot) => slot,
        };
        // Node has a tip but the indexer has none yet.
        let chain_index_slot = match stats.chain_index_point.slot() {
            None => return Self::Syncing(0.0),
            Some(slot) => slot,
        };
        if node_slot.saturating_sub(chain_index_slot) < SYNCED_SLOT_THRESHOLD {
            Self::Synced
        } else {
            // node_slot ≥ chain_index_slot + threshold here, so it is
            // never zero.
            Self::Syncing(100.0 * chain_index_slot as f64 / node_slot as f64)
        }
    }

    /// Returns `true` if the indexer is caught up.
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::Syncing(percent) => write!(f, "syncing ({percent:.2}%)"),
            Self::NotSyncing => write!(f, "not syncing"),
        }
    }
}
