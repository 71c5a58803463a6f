//! Spawners: feeding new tiles in and shutting the feed off.

use tracing::trace;

use super::state::{create_gem, Board};
use crate::core::{Offset, Position, RandomSource};
use crate::gems::{Gem, GemType};

impl<R: RandomSource> Board<R> {
    fn spawner_positions(&self) -> Vec<Position> {
        self.grid
            .iter()
            .filter(|gem| gem.gem_type.spawns())
            .map(|gem| gem.position)
            .collect()
    }

    pub(super) fn spawner_targets(&self, offset: Offset) -> Vec<Position> {
        self.spawner_positions()
            .into_iter()
            .map(|spawner| spawner.offset(offset))
            .collect()
    }

    /// Drop a random matching-type tile into each spawner's empty outlet.
    ///
    /// The outlet is the cell one step along gravity from the spawner.
    /// Returns the new tiles.
    pub fn feed(&mut self) -> Vec<Gem> {
        let mut fed = Vec::new();
        for target in self.spawner_targets(self.config.gravity) {
            if !self.grid.gem_at(target).is_some_and(|gem| gem.gem_type.is_empty()) {
                continue;
            }
            let Some(&gem_type) = self.rng.choose(&self.config.matching_types) else {
                continue;
            };

            let gem = create_gem(&mut self.factory, &self.config, gem_type, target);
            self.grid.place(gem.clone());
            trace!(at = %target, ?gem_type, "fed");
            fed.push(gem);
        }
        fed
    }

    /// Mark each spawner's stop cell as a `Spawnee`.
    ///
    /// Cells that are `Empty` or already a `Spawnee` are left alone, so
    /// repeated calls change nothing. Returns the new markers.
    pub fn stop_feed(&mut self) -> Vec<Gem> {
        let mut stopped = Vec::new();
        for target in self.spawner_targets(self.config.stop_offset) {
            let occupied = self
                .grid
                .gem_at(target)
                .is_some_and(|gem| !gem.gem_type.is_empty() && !gem.gem_type.is_spawned());
            if !occupied {
                continue;
            }

            let marker = create_gem(&mut self.factory, &self.config, GemType::Spawnee, target);
            self.grid.place(marker.clone());
            trace!(at = %target, "feed stopped");
            stopped.push(marker);
        }
        stopped
    }
}
