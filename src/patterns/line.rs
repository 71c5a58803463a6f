//! Match-line shapes expanded into sliding windows.
//!
//! A line is defined by the offset of its first window's first cell, a
//! magnitude and an orientation. Expansion slides the window one cell at a
//! time along every sliding axis, producing `magnitude` start positions per
//! axis, and keeps only the windows that cover the origin. With two sliding
//! axes the windows form the tensor product, row start outer and column
//! start inner; offsets inside a window are row-major.
//!
//! ```
//! use match3_engine::core::Offset;
//! use match3_engine::patterns::{MatchLine, Orientation};
//!
//! let line = MatchLine::new(-2, 0, 3, Orientation::Horizontal).unwrap();
//!
//! assert_eq!(line.windows().len(), 3);
//! assert_eq!(
//!     line.windows()[1].as_slice(),
//!     &[Offset::new(-1, 0), Offset::new(0, 0), Offset::new(1, 0)]
//! );
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ConfigError, Offset, Result};

/// One concrete placement of a shape, as offsets from the origin cell.
pub type Window = SmallVec<[Offset; 5]>;

/// Longest line a pattern may declare.
pub const MAX_MAGNITUDE: u32 = 9;

/// Axes along which a line slides.
///
/// Named after the run of tiles, not the sliding offset: `(-2, 0, 3)` walks
/// the column offset and is a `Horizontal` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// A row of tiles: slides the column offset.
    Horizontal,
    /// A column of tiles: slides the row offset.
    Vertical,
    /// A square block: slides both offsets.
    Both,
}

impl Orientation {
    const fn slides_cols(self) -> bool {
        matches!(self, Orientation::Horizontal | Orientation::Both)
    }

    const fn slides_rows(self) -> bool {
        matches!(self, Orientation::Vertical | Orientation::Both)
    }
}

/// A match shape and the windows in which it can be satisfied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchLine {
    orientation: Orientation,
    magnitude: u32,
    windows: Vec<Window>,
}

impl MatchLine {
    /// Expand a line definition.
    ///
    /// Windows that miss the origin are dropped. Fails if the magnitude is
    /// outside `2..=MAX_MAGNITUDE` or no window is left.
    pub fn new(col_offset: i32, row_offset: i32, magnitude: u32, orientation: Orientation) -> Result<Self> {
        let length = match i32::try_from(magnitude) {
            Ok(length) if (2..=MAX_MAGNITUDE).contains(&magnitude) => length,
            _ => {
                return Err(ConfigError::MalformedPattern(format!(
                    "{orientation:?} line of magnitude {magnitude}"
                )))
            }
        };

        // Starts along one axis whose window covers offset 0.
        let starts = |offset: i32, slides: bool| -> SmallVec<[i32; 5]> {
            let (count, span) = if slides { (length, length) } else { (1, 1) };
            (offset..offset.saturating_add(count))
                .filter(|start| (1 - span..=0).contains(start))
                .collect()
        };
        let col_starts = starts(col_offset, orientation.slides_cols());
        let row_starts = starts(row_offset, orientation.slides_rows());
        let col_span = if orientation.slides_cols() { length } else { 1 };
        let row_span = if orientation.slides_rows() { length } else { 1 };

        if col_starts.is_empty() || row_starts.is_empty() {
            return Err(ConfigError::MalformedPattern(format!(
                "{orientation:?} line of magnitude {magnitude} from ({col_offset}, {row_offset}) \
                 never covers the origin"
            )));
        }

        let mut windows = Vec::with_capacity(col_starts.len() * row_starts.len());
        for &row_start in &row_starts {
            for &col_start in &col_starts {
                let window: Window = (row_start..row_start + row_span)
                    .flat_map(|row| (col_start..col_start + col_span).map(move |col| Offset::new(col, row)))
                    .collect();
                windows.push(window);
            }
        }

        Ok(Self {
            orientation,
            magnitude,
            windows,
        })
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn magnitude(&self) -> u32 {
        self.magnitude
    }

    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// The same shape restricted to the window that starts at the origin.
    ///
    /// Scanning every tile with anchored lines finds each match from its
    /// first cell.
    #[must_use]
    pub fn anchored(&self) -> Self {
        Self {
            orientation: self.orientation,
            magnitude: self.magnitude,
            windows: self
                .windows
                .iter()
                .filter(|window| window.first().is_some_and(|offset| offset.is_origin()))
                .cloned()
                .collect(),
        }
    }
}

impl std::fmt::Display for MatchLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}{} ({} windows)",
            self.orientation,
            self.magnitude,
            self.windows.len()
        )
    }
}
