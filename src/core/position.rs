//! Cell coordinates and board geometry.
//!
//! ## Coordinates
//!
//! - `Position` is a `(row, col)` cell address. Coordinates are signed so that
//!   applying an `Offset` may leave the grid; such positions are simply
//!   rejected by the `BoardShape` predicates.
//! - `Offset` is a `(col, row)` displacement. Pattern windows, gravity and
//!   spawner offsets are all expressed as offsets.
//!
//! ## Usage
//!
//! ```
//! use match3_engine::core::{BoardShape, Offset, Position};
//!
//! let shape = BoardShape::new(4, 5, 1);
//!
//! let pos = Position::new(1, 1);
//! assert!(shape.is_boundary_index(pos));
//! assert!(!shape.is_boundary_index(pos.offset(Offset::new(-1, 0))));
//!
//! assert_eq!(shape.index_of(pos), Some(6));
//! assert_eq!(shape.position_at(6), pos);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A cell address on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position displaced by `offset`.
    #[must_use]
    pub const fn offset(self, offset: Offset) -> Self {
        Self {
            row: self.row + offset.row,
            col: self.col + offset.col,
        }
    }

    /// Offset from `self` to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Position) -> Offset {
        Offset::new(other.col - self.col, other.row - self.row)
    }

    /// True if `other` shares an edge with this cell.
    #[must_use]
    pub const fn is_adjacent(self, other: Position) -> bool {
        let d = self.delta_to(other);
        d.col.abs() + d.row.abs() == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A `(col, row)` displacement between cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub col: i32,
    pub row: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0, 0);

    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn is_origin(self) -> bool {
        self.col == 0 && self.row == 0
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(-self.col, -self.row)
    }

    /// Unit vector perpendicular to an axis-aligned unit offset.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        Self::new(self.row.abs(), self.col.abs())
    }

    #[must_use]
    pub const fn scaled(self, factor: i32) -> Self {
        Self::new(self.col * factor, self.row * factor)
    }

    #[must_use]
    pub const fn plus(self, other: Offset) -> Self {
        Self::new(self.col + other.col, self.row + other.row)
    }

    /// True for the four unit offsets along the grid axes.
    #[must_use]
    pub const fn is_axis_unit(self) -> bool {
        self.col.abs() + self.row.abs() == 1
    }
}

impl From<(i32, i32)> for Offset {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// Board geometry: dimensions, border thickness and fixed wall cells.
///
/// The playable rectangle excludes `border` rows/columns on every side.
/// Fixed cells are inside the playable rectangle but never hold movable tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardShape {
    rows: i32,
    cols: i32,
    border: i32,
    fixed: FxHashSet<Position>,
}

impl BoardShape {
    #[must_use]
    pub fn new(rows: i32, cols: i32, border: i32) -> Self {
        Self {
            rows,
            cols,
            border,
            fixed: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn with_fixed(mut self, fixed: impl IntoIterator<Item = Position>) -> Self {
        self.fixed.extend(fixed);
        self
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub const fn border(&self) -> i32 {
        self.border
    }

    /// Total number of cells, border included.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the position addresses a cell of the grid (border included).
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Linear row-major index of a position, if it is on the grid.
    #[must_use]
    pub const fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.row * self.cols + pos.col) as usize)
        } else {
            None
        }
    }

    /// Position of a linear index. The index must be below `len()`.
    #[must_use]
    pub const fn position_at(&self, index: usize) -> Position {
        let index = index as i32;
        Position::new(index / self.cols, index % self.cols)
    }

    /// True if the position lies inside the playable (non-border) rectangle.
    #[must_use]
    pub const fn is_boundary_index(&self, pos: Position) -> bool {
        pos.row >= self.border
            && pos.row < self.rows - self.border
            && pos.col >= self.border
            && pos.col < self.cols - self.border
    }

    /// Boundary-valid and not a fixed wall cell.
    #[must_use]
    pub fn is_movable_index(&self, pos: Position) -> bool {
        self.is_boundary_index(pos) && !self.fixed.contains(&pos)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(|index| self.position_at(index))
    }

    /// Cell indices ordered from the gravity sink outward.
    ///
    /// Cells with the greatest projection onto `gravity` come first; ties keep
    /// row-major order.
    #[must_use]
    pub fn gravity_order(&self, gravity: Offset) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&index| {
            let pos = self.position_at(index);
            std::cmp::Reverse(pos.row * gravity.row + pos.col * gravity.col)
        });
        order
    }
}
