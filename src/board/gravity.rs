//! Gravity: one tick of falling.
//!
//! A tick visits cells from the gravity sink outward, reading each cell's
//! occupant at visit time, so every tile moves at most one cell per tick.
//!
//! - **Straight**: an empty cell takes the tile directly above it.
//! - **Diagonal**: an empty cell capped by an immovable tile (a blocker, a
//!   spawner) takes a tile from one of the two upper diagonals instead. The
//!   side tried first is drawn from the board's random source.
//!
//! Callers alternate `feed` and `fall` until [`Board::is_settled`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::state::Board;
use crate::core::{Position, RandomSource};
use crate::gems::{Gem, GemId};

/// A tile that moved during a tick, at its final position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FallenGem {
    pub position: Position,
    pub id: GemId,
}

/// Occupants that slide into a vacated cell.
fn falls(gem: &Gem) -> bool {
    gem.gem_type.is_matchable()
}

/// Tiles moved during one tick, in first-move order.
#[derive(Default)]
struct FallLog {
    fallen: Vec<FallenGem>,
    slots: FxHashMap<GemId, usize>,
}

impl FallLog {
    fn record(&mut self, gem: &Gem) {
        match self.slots.get(&gem.id) {
            Some(&slot) => self.fallen[slot].position = gem.position,
            None => {
                self.slots.insert(gem.id, self.fallen.len());
                self.fallen.push(FallenGem {
                    position: gem.position,
                    id: gem.id,
                });
            }
        }
    }

    fn contains(&self, id: GemId) -> bool {
        self.slots.contains_key(&id)
    }
}

impl<R: RandomSource> Board<R> {
    /// Run one tick of gravity. Returns every tile that moved.
    pub fn fall(&mut self) -> Vec<FallenGem> {
        let up = self.config.gravity.reversed();
        let side = self.config.gravity.perpendicular();
        let order = self.grid.shape().gravity_order(self.config.gravity);

        let mut log = FallLog::default();
        let mut capped = Vec::new();
        for index in order {
            let pos = self.grid.shape().position_at(index);
            let above = pos.offset(up);
            if !self.is_open(pos) || !self.grid.shape().is_movable_index(above) {
                continue;
            }

            let Some(occupant) = self.grid.gem_at(above) else {
                continue;
            };
            if falls(occupant) {
                if let Some((dropped, _)) = self.grid.swap_cells(above, pos) {
                    log.record(&dropped);
                }
            } else if !occupant.gem_type.is_empty() {
                capped.push(pos);
            }
        }

        for pos in capped {
            if !self.is_open(pos) {
                continue;
            }

            let sides: [i32; 2] = if self.rng.gen_index(2) == 0 { [-1, 1] } else { [1, -1] };
            let source = sides
                .into_iter()
                .map(|sign| pos.offset(up.plus(side.scaled(sign))))
                .find(|&diagonal| {
                    self.grid.shape().is_movable_index(diagonal)
                        && self
                            .grid
                            .gem_at(diagonal)
                            .is_some_and(|gem| falls(gem) && !log.contains(gem.id))
                });

            if let Some((dropped, _)) = source.and_then(|diagonal| self.grid.swap_cells(diagonal, pos)) {
                log.record(&dropped);
            }
        }

        trace!(moved = log.fallen.len(), "fall tick");
        log.fallen
    }

    /// True if the next [`fall`](Self::fall) would move something.
    #[must_use]
    pub fn has_pending_fall(&self) -> bool {
        let shape = self.grid.shape();
        let up = self.config.gravity.reversed();
        let side = self.config.gravity.perpendicular();

        let source_at = |pos: Position| {
            shape.is_movable_index(pos) && self.grid.gem_at(pos).is_some_and(falls)
        };

        shape.positions().filter(|&pos| self.is_open(pos)).any(|pos| {
            let above = pos.offset(up);
            if !shape.is_movable_index(above) {
                return false;
            }
            match self.grid.gem_at(above) {
                Some(gem) if falls(gem) => true,
                Some(gem) if !gem.gem_type.is_empty() => {
                    [-1, 1].into_iter().any(|sign| source_at(pos.offset(up.plus(side.scaled(sign)))))
                }
                _ => false,
            }
        })
    }

    /// True once nothing would fall and no spawner could feed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let outlet_open = self
            .spawner_targets(self.config.gravity)
            .into_iter()
            .any(|target| self.grid.gem_at(target).is_some_and(|gem| gem.gem_type.is_empty()));
        !outlet_open && !self.has_pending_fall()
    }

    /// Movable cell currently holding `Empty`.
    fn is_open(&self, pos: Position) -> bool {
        self.grid.shape().is_movable_index(pos)
            && self.grid.gem_at(pos).is_some_and(|gem| gem.gem_type.is_empty())
    }
}
