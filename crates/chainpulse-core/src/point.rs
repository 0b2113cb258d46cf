//! Chain points — positions on the followed chain.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A position on a chain: the genesis origin, or a concrete
/// (slot, block hash) pair.
///
/// Genesis orders below every concrete point; concrete points order by
/// slot number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Point {
    /// The origin of the chain — no block observed.
    #[default]
    Genesis,
    /// A concrete block position.
    At {
        /// Slot number of the block.
        slot: u64,
        /// Block hash (`0x…`).
        hash: String,
    },
}

impl Point {
    /// Create a concrete point.
    pub fn at(slot: u64, hash: impl Into<String>) -> Self {
        Self::At {
            slot,
            hash: hash.into(),
        }
    }

    /// Returns `true` if this is the genesis origin.
    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }

    /// The slot number, or `None` at genesis.
    pub fn slot(&self) -> Option<u64> {
        match self {
            Self::Genesis => None,
            Self::At { slot, .. } => Some(*slot),
        }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Genesis, Self::Genesis) => Ordering::Equal,
            (Self::Genesis, Self::At { .. }) => Ordering::Less,
            (Self::At { .. }, Self::Genesis) => Ordering::Greater,
            (Self::At { slot: a, hash: ha }, Self::At { slot: b, hash: hb }) => {
                // Hash breaks exact slot ties so the order stays consistent with Eq.
                a.cmp(b).then_with(|| ha.cmp(hb))
            }
        }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => write!(f, "genesis"),
            Self::At { slot, hash } => write!(f, "slot {slot} ({hash})"),
        }
    }
}
