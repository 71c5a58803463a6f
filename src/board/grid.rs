//! Grid storage.
//!
//! The grid is a row-major `im::Vector` of gems, one per cell. Persistent
//! storage makes cloning O(1), so trial boards for hint search cost nothing
//! until they diverge.

use im::Vector;

use crate::core::{BoardShape, Position};
use crate::gems::Gem;

/// The cells of a board and their geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    shape: BoardShape,
    cells: Vector<Gem>,
}

impl Grid {
    /// Build a grid from row-major cells. `cells.len()` must equal `shape.len()`.
    pub(crate) fn new(shape: BoardShape, cells: Vector<Gem>) -> Self {
        debug_assert_eq!(cells.len(), shape.len());
        Self { shape, cells }
    }

    #[must_use]
    pub fn shape(&self) -> &BoardShape {
        &self.shape
    }

    /// Occupant of a cell, or `None` off the grid.
    #[must_use]
    pub fn gem_at(&self, pos: Position) -> Option<&Gem> {
        self.cells.get(self.shape.index_of(pos)?)
    }

    pub(crate) fn gem_at_mut(&mut self, pos: Position) -> Option<&mut Gem> {
        let index = self.shape.index_of(pos)?;
        self.cells.get_mut(index)
    }

    /// Put a gem into the cell named by its own position.
    ///
    /// Returns the previous occupant, or `None` (and drops nothing) if the
    /// position is off the grid.
    pub(crate) fn place(&mut self, gem: Gem) -> Option<Gem> {
        let index = self.shape.index_of(gem.position)?;
        Some(self.cells.set(index, gem))
    }

    /// Exchange the occupants of two cells, updating their positions.
    ///
    /// Returns `(gem now at b, gem now at a)`.
    pub(crate) fn swap_cells(&mut self, a: Position, b: Position) -> Option<(Gem, Gem)> {
        let index_a = self.shape.index_of(a)?;
        let index_b = self.shape.index_of(b)?;

        let mut from_a = self.cells[index_a].clone();
        let mut from_b = self.cells[index_b].clone();
        from_a.position = b;
        from_b.position = a;

        self.cells.set(index_a, from_b.clone());
        self.cells.set(index_b, from_a.clone());
        Some((from_a, from_b))
    }

    /// All gems in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Gem> {
        self.cells.iter()
    }

    /// Number of cells holding `Empty`.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.iter().filter(|gem| gem.gem_type.is_empty()).count()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cols = self.shape.cols() as usize;
        for (index, gem) in self.cells.iter().enumerate() {
            if index > 0 && index % cols == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", gem.gem_type.symbol())?;
        }
        Ok(())
    }
}
