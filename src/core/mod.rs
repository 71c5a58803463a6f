//! Core engine types: positions, board geometry, RNG, configuration, errors.
//!
//! This module contains the level-agnostic building blocks. Levels configure
//! these via `BoardConfig` rather than modifying the engine.

pub mod position;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{BoardShape, Offset, Position};
pub use rng::{BoardRng, RandomSource};
pub use config::{BoardConfig, DEFAULT_ENDURANCE};
pub use error::{ConfigError, Result};
