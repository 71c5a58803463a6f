//! Configuration errors.
//!
//! Every error here is an authoring mistake detected at setup: a board that
//! cannot be built, a malformed pattern, or a pattern library that admits no
//! valid initial fill. Runtime misuse (out-of-boundary targets) never errors;
//! the mutation ops return empty results instead.

use thiserror::Error;

use super::position::{Offset, Position};
use crate::gems::GemType;

/// Fatal setup error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid board dimensions {rows}x{cols} with border {border}")]
    InvalidDimensions { rows: i32, cols: i32, border: i32 },

    #[error("gravity must be an axis-aligned unit offset, got ({}, {})", .0.col, .0.row)]
    InvalidGravity(Offset),

    #[error("stop offset must differ from the gravity offset")]
    StopOffsetIsGravity,

    #[error("matching type set is empty")]
    NoMatchingTypes,

    #[error("{0:?} cannot be a matching type")]
    NonColoredMatchingType(GemType),

    #[error("{0:?} listed twice in the matching type set")]
    DuplicateMatchingType(GemType),

    #[error("cell {0} is outside the grid")]
    CellOutOfRange(Position),

    #[error("malformed pattern: {0}")]
    MalformedPattern(String),

    #[error("unknown layout symbol {0:?}")]
    UnknownSymbol(char),

    #[error("layout is {rows}x{cols}, board expects {expected_rows}x{expected_cols}")]
    LayoutMismatch {
        rows: usize,
        cols: usize,
        expected_rows: i32,
        expected_cols: i32,
    },

    #[error("no matching type can be placed at {0} without creating a match")]
    Unsatisfiable(Position),
}

/// Result alias for setup operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
