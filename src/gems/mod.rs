//! Tiles: types, capabilities, entities and their factory.

pub mod kind;
pub mod gem;
pub mod factory;

pub use kind::{GemType, SpecialKey};
pub use gem::{Gem, GemId};
pub use factory::GemFactory;
