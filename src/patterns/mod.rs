//! Declarative match shapes and their window expansion.

pub mod line;
pub mod library;

pub use line::{MatchLine, Orientation, Window, MAX_MAGNITUDE};
pub use library::{PatternLibrary, PatternSpec};
