//! Tile entities.
//!
//! A `Gem` is the occupant of one grid cell. Its `id` survives swaps, falls
//! and crunch relocation; break, crunch removal and match clearing replace
//! the occupant with a fresh `Empty` gem carrying a new id.

use serde::{Deserialize, Serialize};

use super::kind::{GemType, SpecialKey};
use crate::core::Position;

/// Stable identity of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GemId(pub u64);

impl GemId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for GemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gem({})", self.0)
    }
}

/// A tile on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gem {
    pub id: GemId,
    pub gem_type: GemType,
    pub position: Position,

    /// Creation order; the highest sequence in a combo group is its anchor.
    pub sequence: u64,

    /// Remaining crunch relocations.
    pub endurance: u32,

    /// Remaining block propagations.
    pub endurance_for_block: u32,

    /// Mid-transition tiles are excluded from matching.
    pub is_moving: bool,

    /// Directional behaviour of a promoted tile.
    pub special_key: Option<SpecialKey>,

    /// Turn in which the tile was promoted; it cannot match again that turn.
    pub preserved_from_match: Option<u64>,
}

impl Gem {
    /// True if the tile can join a match during `turn`.
    #[must_use]
    pub fn is_match_eligible(&self, turn: u64) -> bool {
        self.gem_type.is_matchable() && !self.is_moving && self.preserved_from_match != Some(turn)
    }
}

impl std::fmt::Display for Gem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} at {} seq {}",
            self.id, self.gem_type, self.position, self.sequence
        )
    }
}
