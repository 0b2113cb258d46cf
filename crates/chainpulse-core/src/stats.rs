//! Interval statistics — the per-window accumulation record.

use serde::{Deserialize, Serialize};

use crate::event::SyncEvent;
use crate::point::Point;

/// Statistics accumulated over one reporting window.
///
/// Forms a monoid under [`IntervalStats::combine`]: counters add, point
/// fields keep the most recent concrete value. `IntervalStats::default()`
/// is the two-sided identity (counters zero, both points at genesis).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalStats {
    /// Blocks applied during the window.
    pub blocks_applied: u64,
    /// Rollbacks applied during the window.
    pub rollbacks_applied: u64,
    /// Last-seen tip of the indexer's own chain-sync cursor.
    pub chain_index_point: Point,
    /// Last-seen tip reported by the followed node.
    pub node_point: Point,
}

impl IntervalStats {
    /// Build the single-event record for one raw sync event.
    ///
    /// A resume leaves `node_point` at genesis: it carries no fresh
    /// node-tip observation, so any node tip known for the window must
    /// come from a different event.
    pub fn from_event(event: &SyncEvent) -> Self {
        match event {
            SyncEvent::Applied {
                chain_index_tip,
                node_tip,
            } => Self {
                blocks_applied: 1,
                rollbacks_applied: 0,
                chain_index_point: chain_index_tip.clone(),
                node_point: node_tip.clone(),
            },
            SyncEvent::RolledBack {
                chain_index_tip,
                node_tip,
            } => Self {
                blocks_applied: 0,
                rollbacks_applied: 1,
                chain_index_point: chain_index_tip.clone(),
                node_point: node_tip.clone(),
            },
            SyncEvent::Resumed { chain_index_tip } => Self {
                blocks_applied: 0,
                rollbacks_applied: 0,
                chain_index_point: chain_index_tip.clone(),
                node_point: Point::Genesis,
            },
        }
    }

    /// Combine two window records.
    ///
    /// Counters add; each point field takes the right-hand value unless
    /// it is genesis. The right bias is load-bearing: within one drain
    /// the chronologically last event's points win, and two concrete
    /// points combine to the second operand even when its slot is lower
    /// (a rollback after an apply must report the rolled-back tip).
    pub fn combine(self, other: Self) -> Self {
        Self {
            blocks_applied: self.blocks_applied + other.blocks_applied,
            rollbacks_applied: self.rollbacks_applied + other.rollbacks_applied,
            chain_index_point: pick_point(self.chain_index_point, other.chain_index_point),
            node_point: pick_point(self.node_point, other.node_point),
        }
    }

    /// Returns `true` if no event contributed to this record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Right-biased point choice: a concrete `b` wins, genesis contributes nothing.
fn pick_point(a: Point, b: Point) -> Point {
    if b.is_genesis() {
        a
    } else {
        b
    }
}
