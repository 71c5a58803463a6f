//! Pattern library: the configured set of match shapes.
//!
//! The library keeps two views of the same shapes:
//! - **all-way** lines, with every window containing the origin, answer
//!   "would a tile of this type here complete a match?" (initial fill,
//!   `can_place`);
//! - **positive** lines, anchored at their first cell, drive the live scan.
//!
//! Shapes are kept in configuration order; the first contributing shape of a
//! combo group decides its special key, so larger shapes should come first.

use serde::{Deserialize, Serialize};

use super::line::{MatchLine, Orientation, MAX_MAGNITUDE};
use crate::core::{ConfigError, Result};

/// Serializable definition of one match shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternSpec {
    pub col_offset: i32,
    pub row_offset: i32,
    pub magnitude: u32,
    pub orientation: Orientation,
}

impl PatternSpec {
    /// Shape whose windows cover every placement containing the origin.
    ///
    /// An out-of-range magnitude is kept as given and rejected by [`Self::expand`].
    #[must_use]
    pub const fn line(magnitude: u32, orientation: Orientation) -> Self {
        let reach = if magnitude > MAX_MAGNITUDE { 0 } else { 1 - magnitude as i32 };
        let (col_offset, row_offset) = match orientation {
            Orientation::Horizontal => (reach, 0),
            Orientation::Vertical => (0, reach),
            Orientation::Both => (reach, reach),
        };
        Self {
            col_offset,
            row_offset,
            magnitude,
            orientation,
        }
    }

    /// Lines of five, four and three in both directions, then the 2x2 square.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        vec![
            Self::line(5, Orientation::Horizontal),
            Self::line(5, Orientation::Vertical),
            Self::line(4, Orientation::Horizontal),
            Self::line(4, Orientation::Vertical),
            Self::line(3, Orientation::Horizontal),
            Self::line(3, Orientation::Vertical),
            Self::line(2, Orientation::Both),
        ]
    }

    /// Expand into a [`MatchLine`].
    pub fn expand(&self) -> Result<MatchLine> {
        MatchLine::new(self.col_offset, self.row_offset, self.magnitude, self.orientation)
    }
}

/// Expanded pattern library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternLibrary {
    allway: Vec<MatchLine>,
    positive: Vec<MatchLine>,
}

impl PatternLibrary {
    /// Expand and validate every spec.
    pub fn new(specs: &[PatternSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(ConfigError::MalformedPattern("pattern library is empty".into()));
        }

        let allway = specs.iter().map(PatternSpec::expand).collect::<Result<Vec<_>>>()?;
        let positive = allway.iter().map(MatchLine::anchored).collect();

        Ok(Self { allway, positive })
    }

    /// Library built from [`PatternSpec::standard`].
    #[must_use]
    pub fn standard() -> Self {
        let allway: Vec<MatchLine> = PatternSpec::standard()
            .iter()
            .filter_map(|spec| spec.expand().ok())
            .collect();
        let positive = allway.iter().map(MatchLine::anchored).collect();
        Self { allway, positive }
    }

    /// Lines used for placement feasibility.
    #[must_use]
    pub fn allway(&self) -> &[MatchLine] {
        &self.allway
    }

    /// Lines used for live scanning.
    #[must_use]
    pub fn positive(&self) -> &[MatchLine] {
        &self.positive
    }
}
