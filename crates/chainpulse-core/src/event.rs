//! Raw sync events observed by the indexer's chain-sync loop.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// One raw event from the chain-sync loop.
///
/// The producer publishes one of these per apply, rollback, or resume;
/// the reporter folds them into per-window [`IntervalStats`] records.
///
/// [`IntervalStats`]: crate::stats::IntervalStats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// A block was applied on top of the local chain index.
    Applied {
        /// Local tip after applying the block.
        chain_index_tip: Point,
        /// Node tip observed at apply time.
        node_tip: Point,
    },
    /// The local chain index rolled back to an earlier point.
    RolledBack {
        /// Local tip after the rollback.
        chain_index_tip: Point,
        /// Node tip observed at rollback time.
        node_tip: Point,
    },
    /// The follower reconnected and resumed from a point.
    ///
    /// Carries no node-tip observation.
    Resumed {
        /// Local tip at resume.
        chain_index_tip: Point,
    },
}
