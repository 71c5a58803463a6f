//! Gem allocation.
//!
//! Every tile the board creates (fill, feed, promotion, clearing) comes from
//! the factory, which hands out unique ids and strictly increasing sequence
//! numbers.

use super::gem::{Gem, GemId};
use super::kind::GemType;
use crate::core::Position;

/// Allocates gem ids and creation sequences.
#[derive(Clone, Debug, Default)]
pub struct GemFactory {
    next_id: u64,
    next_sequence: u64,
}

impl GemFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gem with a fresh id and sequence.
    pub fn create(&mut self, gem_type: GemType, position: Position) -> Gem {
        let id = GemId(self.next_id);
        self.next_id += 1;

        Gem {
            id,
            gem_type,
            position,
            sequence: self.next_sequence(),
            endurance: 0,
            endurance_for_block: 0,
            is_moving: false,
            special_key: None,
            preserved_from_match: None,
        }
    }

    /// Rewrite a gem's type in place, stamping a new sequence.
    ///
    /// The id is kept: the entity is the same, only its content changed.
    pub fn retype(&mut self, gem: &mut Gem, gem_type: GemType) {
        gem.gem_type = gem_type;
        gem.sequence = self.next_sequence();
    }

    /// Number of gems created so far.
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.next_id
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}
