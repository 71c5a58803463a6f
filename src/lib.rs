//! # match3-engine
//!
//! Board rule engine for match-3 tile puzzles.
//!
//! ## Design Principles
//!
//! 1. **Level-Agnostic**: No hardcoded dimensions, colors or shapes.
//!    Levels configure these through `BoardConfig`.
//!
//! 2. **Deterministic**: Every random decision goes through an injectable
//!    `RandomSource`; a seeded board replays exactly.
//!
//! 3. **Queries Over Failures**: Misplaced targets yield empty results;
//!    affordances are asked up front (`can_swap`, `can_place`).
//!
//! ## Architecture
//!
//! - **Persistent Grid**: O(1) cloning via `im-rs`, so hint search tries
//!   every swap on a throwaway copy.
//!
//! - **Sliding Windows**: Match shapes are expanded once into windows of
//!   offsets; matching is a walk over those windows.
//!
//! ## Modules
//!
//! - `core`: Positions, board geometry, RNG, configuration, errors
//! - `gems`: Tile types, capabilities and the gem factory
//! - `patterns`: Match shapes and the pattern library
//! - `board`: The board and its operations (swap, match, spawn, fall, fill)

pub mod core;
pub mod gems;
pub mod patterns;
pub mod board;

// Re-export commonly used types
pub use crate::core::{
    BoardShape, Offset, Position,
    BoardRng, RandomSource,
    BoardConfig, DEFAULT_ENDURANCE,
    ConfigError, Result,
};

pub use crate::gems::{Gem, GemFactory, GemId, GemType, SpecialKey};

pub use crate::patterns::{MatchLine, Orientation, PatternLibrary, PatternSpec, Window, MAX_MAGNITUDE};

pub use crate::board::{
    Board, Grid,
    ComboGroup, PatternInstance,
    CrunchedGems, FallenGem,
    exists_potential_match, resolve_special_key,
};
