//! Initial fill: populate empty cells without creating a match.

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::matching::exists_potential_match;
use super::state::{create_gem, Board};
use crate::core::{ConfigError, Position, RandomSource, Result};
use crate::gems::GemType;

impl<R: RandomSource> Board<R> {
    /// True if a tile of `gem_type` at `pos` would not complete any shape.
    #[must_use]
    pub fn can_place(&self, pos: Position, gem_type: GemType) -> bool {
        self.grid.shape().is_movable_index(pos) && !self.completes_shape(pos, gem_type)
    }

    fn completes_shape(&self, pos: Position, gem_type: GemType) -> bool {
        self.patterns
            .allway()
            .iter()
            .any(|line| exists_potential_match(&self.grid, pos, line, gem_type))
    }

    /// Fill every empty cell, in grid order, with a random matching type
    /// that does not complete a shape.
    ///
    /// Empty occupants of fixed cells are filled too; only configured
    /// occupants (walls, spawners) are left alone.
    ///
    /// There is no backtracking: a cell with no admissible type aborts the
    /// fill with [`ConfigError::Unsatisfiable`], leaving earlier cells filled.
    pub fn put_initial_gems(&mut self) -> Result<()> {
        let open: Vec<Position> = self
            .grid
            .iter()
            .filter(|gem| gem.gem_type.is_empty())
            .map(|gem| gem.position)
            .collect();

        for pos in &open {
            let allowed: SmallVec<[GemType; 6]> = self
                .config
                .matching_types
                .iter()
                .copied()
                .filter(|&gem_type| !self.completes_shape(*pos, gem_type))
                .collect();

            let Some(&gem_type) = self.rng.choose(&allowed) else {
                warn!(at = %pos, types = self.config.matching_types.len(), "no matching type fits");
                return Err(ConfigError::Unsatisfiable(*pos));
            };

            let gem = create_gem(&mut self.factory, &self.config, gem_type, *pos);
            self.grid.place(gem);
        }

        debug!(filled = open.len(), "initial fill complete");
        Ok(())
    }
}
