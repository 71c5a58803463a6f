//! Board configuration.
//!
//! Hosts configure the engine at construction by providing a `BoardConfig`:
//! - Geometry: dimensions, border thickness, fixed wall cells
//! - Physics: gravity and the spawner stop offset
//! - Content: matching types, pattern library, initial cell overrides
//! - Budgets: special-tile endurance and block propagation budget
//!
//! The engine never hardcodes a level - every board-specific value lives here.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};
use super::position::{BoardShape, Offset, Position};
use crate::gems::GemType;
use crate::patterns::{PatternLibrary, PatternSpec};

/// Starting endurance and block budget of a square special.
pub const DEFAULT_ENDURANCE: u32 = 4;

/// Complete board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows, border included.
    pub rows: i32,

    /// Number of columns, border included.
    pub cols: i32,

    /// Non-playable frame thickness on every side.
    pub border: i32,

    /// Playable cells that never hold movable tiles.
    #[serde(default)]
    pub fixed: Vec<Position>,

    /// Direction tiles fall in, as a `(col, row)` unit offset.
    pub gravity: Offset,

    /// Offset from a spawner to the cell marked when feeding stops.
    /// The spawner itself by default.
    pub stop_offset: Offset,

    /// Types drawn for fill and feed.
    pub matching_types: Vec<GemType>,

    /// Match shapes in priority order.
    pub patterns: Vec<PatternSpec>,

    /// Initial occupants overriding the default layout.
    #[serde(default)]
    pub cells: Vec<(Position, GemType)>,

    /// Crunch endurance given to a promoted square special.
    pub endurance: u32,

    /// Block propagation budget of a promoted square special.
    pub block_budget: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            border: 0,
            fixed: Vec::new(),
            gravity: Offset::new(0, 1),
            stop_offset: Offset::ZERO,
            matching_types: GemType::COLORS[..5].to_vec(),
            patterns: PatternSpec::standard(),
            cells: Vec::new(),
            endurance: DEFAULT_ENDURANCE,
            block_budget: DEFAULT_ENDURANCE,
        }
    }
}

impl BoardConfig {
    /// Default configuration with the given dimensions.
    #[must_use]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_border(mut self, border: i32) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub fn with_fixed(mut self, pos: Position) -> Self {
        self.fixed.push(pos);
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: Offset) -> Self {
        self.gravity = gravity;
        self
    }

    #[must_use]
    pub fn with_stop_offset(mut self, offset: Offset) -> Self {
        self.stop_offset = offset;
        self
    }

    #[must_use]
    pub fn with_matching_types(mut self, types: impl Into<Vec<GemType>>) -> Self {
        self.matching_types = types.into();
        self
    }

    #[must_use]
    pub fn with_patterns(mut self, patterns: impl Into<Vec<PatternSpec>>) -> Self {
        self.patterns = patterns.into();
        self
    }

    /// Place a specific occupant at a cell (spawners, blockers).
    #[must_use]
    pub fn with_cell(mut self, pos: Position, gem_type: GemType) -> Self {
        self.cells.push((pos, gem_type));
        self
    }

    #[must_use]
    pub fn with_endurance(mut self, endurance: u32) -> Self {
        self.endurance = endurance;
        self
    }

    #[must_use]
    pub fn with_block_budget(mut self, budget: u32) -> Self {
        self.block_budget = budget;
        self
    }

    /// Board geometry derived from this configuration.
    #[must_use]
    pub fn shape(&self) -> BoardShape {
        BoardShape::new(self.rows, self.cols, self.border).with_fixed(self.fixed.iter().copied())
    }

    /// Expand the pattern specs.
    pub fn pattern_library(&self) -> Result<PatternLibrary> {
        PatternLibrary::new(&self.patterns)
    }

    /// Check every configuration invariant.
    pub fn validate(&self) -> Result<()> {
        let playable_rows = self.rows - 2 * self.border;
        let playable_cols = self.cols - 2 * self.border;
        if self.border < 0 || playable_rows < 1 || playable_cols < 1 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                border: self.border,
            });
        }

        if !self.gravity.is_axis_unit() {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if self.stop_offset == self.gravity {
            return Err(ConfigError::StopOffsetIsGravity);
        }

        if self.matching_types.is_empty() {
            return Err(ConfigError::NoMatchingTypes);
        }
        for (i, &gem_type) in self.matching_types.iter().enumerate() {
            if !gem_type.is_colored() {
                return Err(ConfigError::NonColoredMatchingType(gem_type));
            }
            if self.matching_types[..i].contains(&gem_type) {
                return Err(ConfigError::DuplicateMatchingType(gem_type));
            }
        }

        let shape = self.shape();
        let mut placed = self.fixed.iter().chain(self.cells.iter().map(|(pos, _)| pos));
        if let Some(&pos) = placed.find(|&&pos| !shape.contains(pos)) {
            return Err(ConfigError::CellOutOfRange(pos));
        }

        self.pattern_library().map(|_| ())
    }
}
