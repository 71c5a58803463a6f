//! Primitive board mutations: swap, break, make-block and crunch.
//!
//! Every op degrades to a no-op (empty result) when handed a target outside
//! the playable area; callers validate affordances with `can_swap` first.

use tracing::trace;

use super::state::{create_gem, Board};
use crate::core::{Position, RandomSource};
use crate::gems::{Gem, GemType};

/// Outcome of a crunch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrunchedGems {
    /// Tiles overwritten by the advancing source.
    pub removed: Vec<Gem>,
    /// The crunching tile in its final state.
    pub source: Gem,
}

impl<R: RandomSource> Board<R> {
    /// True if the player may swap the tiles at `a` and `b`.
    #[must_use]
    pub fn can_swap(&self, a: Position, b: Position) -> bool {
        let shape = self.grid.shape();
        if !a.is_adjacent(b) || !shape.is_movable_index(a) || !shape.is_movable_index(b) {
            return false;
        }

        let swappable = |pos| {
            self.grid
                .gem_at(pos)
                .is_some_and(|gem| gem.gem_type.is_matchable() && !gem.is_moving)
        };
        swappable(a) && swappable(b)
    }

    /// Exchange the tiles at `a` and `b`.
    ///
    /// No-op unless `b` is a movable cell and `a` is on the grid. Returns
    /// `[tile now at b, tile now at a]`; both keep their ids.
    pub fn swap(&mut self, a: Position, b: Position) -> Vec<Gem> {
        if !self.grid.shape().is_movable_index(b) {
            return Vec::new();
        }

        match self.grid.swap_cells(a, b) {
            Some((at_b, at_a)) => {
                trace!(from = %a, to = %b, "swapped");
                vec![at_b, at_a]
            }
            None => Vec::new(),
        }
    }

    /// Replace the tile at `target` with a fresh `Empty`.
    ///
    /// Returns the removed tile, or nothing if `target` is outside the
    /// playable area.
    pub fn break_tile(&mut self, target: Position) -> Vec<Gem> {
        if !self.grid.shape().is_boundary_index(target) {
            return Vec::new();
        }

        let empty = create_gem(&mut self.factory, &self.config, GemType::Empty, target);
        self.grid.place(empty).into_iter().collect()
    }

    /// Turn `source` into a blocker and spread the block to `near`.
    ///
    /// The source keeps its id and budgets and drops its special key and
    /// transient flags. Spreading converts `near`'s
    /// occupant (keeping only its id) and costs one unit of the source's
    /// block budget; an exhausted budget stops spreading for good.
    pub fn make_block(&mut self, source: Position, near: Position) -> Vec<Gem> {
        let shape = self.grid.shape();
        if !shape.is_boundary_index(source) {
            return Vec::new();
        }
        let spreads = near != source && shape.is_boundary_index(near);

        let Some(source_gem) = self.grid.gem_at_mut(source) else {
            return Vec::new();
        };
        let converted = !source_gem.gem_type.is_blocking();
        if converted {
            debug_assert!(
                source_gem.gem_type != GemType::Choco
                    || source_gem.endurance_for_block == self.config.block_budget,
                "square special must start blocking with the full budget"
            );
            self.factory.retype(source_gem, GemType::Blocked);
            source_gem.special_key = None;
            source_gem.is_moving = false;
            source_gem.preserved_from_match = None;
        }

        let mut spread = None;
        if spreads && source_gem.endurance_for_block > 0 {
            source_gem.endurance_for_block -= 1;

            if let Some(near_id) = self.grid.gem_at(near).map(|gem| gem.id) {
                let mut blocker = self.factory.create(GemType::Blocked, near);
                blocker.id = near_id;
                self.grid.place(blocker.clone());
                spread = Some(blocker);
            }
        }

        let mut blocked = Vec::with_capacity(2);
        if converted {
            blocked.extend(self.grid.gem_at(source).cloned());
        }
        blocked.extend(spread);
        blocked
    }

    /// Clear `source` and advance its tile onto `near`.
    ///
    /// The source cell always becomes `Empty`. While the tile has endurance
    /// left and `near` is playable, the same entity moves onto `near`,
    /// overwriting its occupant, and loses one endurance. Returns `None` if
    /// `source` is outside the playable area.
    pub fn crunch(&mut self, source: Position, near: Position) -> Option<CrunchedGems> {
        let shape = self.grid.shape();
        if !shape.is_boundary_index(source) {
            return None;
        }
        let advances = near != source && shape.is_boundary_index(near);

        let empty = create_gem(&mut self.factory, &self.config, GemType::Empty, source);
        let mut crunching = self.grid.place(empty)?;

        let mut removed = Vec::new();
        if advances && crunching.endurance > 0 {
            crunching.position = near;
            crunching.endurance -= 1;
            removed.extend(self.grid.place(crunching.clone()));
            trace!(id = %crunching.id, to = %near, endurance = crunching.endurance, "crunched");
        }

        Some(CrunchedGems {
            removed,
            source: crunching,
        })
    }
}
