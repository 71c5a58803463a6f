//! Board state: grid, configuration, factory, RNG and turn counter.
//!
//! ## Construction
//!
//! - `Board::new` builds the configured layout: overridden cells get their
//!   configured occupant, other movable cells start `Empty`, and
//!   non-movable cells (border, fixed walls) hold `Blocked`.
//! - `Board::from_rows` builds an explicit layout from text, one symbol per
//!   cell (see [`GemType::symbol`]).
//!
//! ```
//! use match3_engine::{Board, BoardConfig, GemType, Position};
//!
//! let config = BoardConfig::new(2, 3);
//! let board = Board::from_rows_seeded(config, &["RG.", "#BR"], 42).unwrap();
//!
//! assert_eq!(board.tile_at(Position::new(1, 0)).unwrap().gem_type, GemType::Blocked);
//! assert_eq!(board.to_string(), "RG.\n#BR");
//! ```

use im::Vector;

use super::grid::Grid;
use crate::core::{BoardConfig, BoardRng, ConfigError, Position, RandomSource, Result};
use crate::gems::{Gem, GemFactory, GemType};
use crate::patterns::PatternLibrary;

/// A match-3 board and everything needed to mutate it.
#[derive(Clone, Debug)]
pub struct Board<R = BoardRng> {
    pub(super) config: BoardConfig,
    pub(super) grid: Grid,
    pub(super) patterns: PatternLibrary,
    pub(super) factory: GemFactory,
    pub(super) rng: R,
    pub(super) turn: u64,
}

impl Board<BoardRng> {
    /// Build the configured layout with a seeded ChaCha8 source.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::new(config, BoardRng::new(seed))
    }

    /// Build a text layout with a seeded ChaCha8 source.
    pub fn from_rows_seeded(config: BoardConfig, rows: &[&str], seed: u64) -> Result<Self> {
        Self::from_rows(config, rows, BoardRng::new(seed))
    }
}

impl<R: RandomSource> Board<R> {
    /// Build the configured layout.
    pub fn new(config: BoardConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let shape = config.shape();

        let types: Vec<GemType> = shape
            .positions()
            .map(|pos| {
                let overridden = config.cells.iter().rev().find(|(cell, _)| *cell == pos);
                match overridden {
                    Some(&(_, gem_type)) => gem_type,
                    None if shape.is_movable_index(pos) => GemType::Empty,
                    None => GemType::Blocked,
                }
            })
            .collect();

        Self::build(config, types, rng)
    }

    /// Build an explicit layout, one symbol per cell.
    ///
    /// `config.cells` is ignored: the text is the whole layout.
    pub fn from_rows(config: BoardConfig, rows: &[&str], rng: R) -> Result<Self> {
        config.validate()?;

        let width = rows.first().map_or(0, |row| row.chars().count());
        let mismatch = || ConfigError::LayoutMismatch {
            rows: rows.len(),
            cols: width,
            expected_rows: config.rows,
            expected_cols: config.cols,
        };
        if rows.len() != config.rows as usize || rows.iter().any(|row| row.chars().count() != config.cols as usize) {
            return Err(mismatch());
        }

        let types = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|symbol| GemType::from_symbol(symbol).ok_or(ConfigError::UnknownSymbol(symbol)))
            .collect::<Result<Vec<_>>>()?;

        Self::build(config, types, rng)
    }

    fn build(config: BoardConfig, types: Vec<GemType>, rng: R) -> Result<Self> {
        let shape = config.shape();
        let patterns = config.pattern_library()?;

        let mut factory = GemFactory::new();
        let cells: Vector<Gem> = types
            .into_iter()
            .enumerate()
            .map(|(index, gem_type)| create_gem(&mut factory, &config, gem_type, shape.position_at(index)))
            .collect();

        Ok(Self {
            grid: Grid::new(shape, cells),
            config,
            patterns,
            factory,
            rng,
            turn: 0,
        })
    }

    /// Occupant of a cell, or `None` off the grid.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Gem> {
        self.grid.gem_at(pos)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// Current turn; promoted tiles cannot match again during it.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Start the next turn.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    /// Flag a tile as mid-transition (excluded from matching) or settled.
    ///
    /// Returns false if the position is off the grid.
    pub fn set_moving(&mut self, pos: Position, moving: bool) -> bool {
        match self.grid.gem_at_mut(pos) {
            Some(gem) => {
                gem.is_moving = moving;
                true
            }
            None => false,
        }
    }
}

impl<R> std::fmt::Display for Board<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.grid, f)
    }
}

/// Create a gem, giving square specials their configured budgets.
pub(super) fn create_gem(factory: &mut GemFactory, config: &BoardConfig, gem_type: GemType, pos: Position) -> Gem {
    let mut gem = factory.create(gem_type, pos);
    if gem_type == GemType::Choco {
        gem.endurance = config.endurance;
        gem.endurance_for_block = config.block_budget;
    }
    gem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = BoardConfig::new(4, 5)
            .with_border(1)
            .with_cell(Position::new(0, 2), GemType::Spawner);
        let board = Board::with_seed(config, 42).unwrap();

        assert_eq!(board.to_string(), "##S##\n#...#\n#...#\n#####");
        assert_eq!(board.grid().empty_count(), 6);
    }

    #[test]
    fn test_fixed_cells_start_blocked() {
        let config = BoardConfig::new(3, 3).with_fixed(Position::new(1, 1));
        let board = Board::with_seed(config, 42).unwrap();

        assert_eq!(board.tile_at(Position::new(1, 1)).unwrap().gem_type, GemType::Blocked);
        assert_eq!(board.grid().empty_count(), 8);
    }

    #[test]
    fn test_positions_match_cells() {
        let board = Board::with_seed(BoardConfig::new(3, 4), 1).unwrap();

        for gem in board.grid().iter() {
            assert_eq!(board.tile_at(gem.position).unwrap().id, gem.id);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig::new(3, 3).with_matching_types(Vec::<GemType>::new());
        assert_eq!(
            Board::with_seed(config, 1).unwrap_err(),
            ConfigError::NoMatchingTypes
        );
    }

    #[test]
    fn test_from_rows_errors() {
        let config = BoardConfig::new(2, 2);

        assert!(matches!(
            Board::from_rows_seeded(config.clone(), &["RG"], 1),
            Err(ConfigError::LayoutMismatch { .. })
        ));
        assert_eq!(
            Board::from_rows_seeded(config, &["RG", "Bx"], 1).unwrap_err(),
            ConfigError::UnknownSymbol('x')
        );
    }

    #[test]
    fn test_layout_choco_gets_budgets() {
        let config = BoardConfig::new(1, 2);
        let board = Board::from_rows_seeded(config, &["@R"], 1).unwrap();

        let choco = board.tile_at(Position::new(0, 0)).unwrap();
        assert_eq!(choco.endurance, 4);
        assert_eq!(choco.endurance_for_block, 4);
        assert_eq!(board.tile_at(Position::new(0, 1)).unwrap().endurance, 0);
    }

    #[test]
    fn test_turn_and_moving_flags() {
        let mut board = Board::from_rows_seeded(BoardConfig::new(1, 2), &["RG"], 1).unwrap();

        assert_eq!(board.turn(), 0);
        board.advance_turn();
        assert_eq!(board.turn(), 1);

        assert!(board.set_moving(Position::new(0, 1), true));
        assert!(board.tile_at(Position::new(0, 1)).unwrap().is_moving);
        assert!(!board.set_moving(Position::new(5, 5), true));
    }
}
