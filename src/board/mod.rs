//! The board and its rule engine.
//!
//! `Board` owns the grid and every operation a controller drives during a
//! turn. Operations are split by concern:
//!
//! - `ops`: swap, break, make-block, crunch
//! - `matching`: scanning, combo merging, special promotion, hints
//! - `spawn`: feeding spawners and stopping them
//! - `gravity`: one tick of falling
//! - `fill`: initial population without matches
//!
//! A typical turn:
//!
//! ```
//! use match3_engine::{Board, BoardConfig, GemType, Position};
//!
//! let config = BoardConfig::new(6, 6)
//!     .with_border(1)
//!     .with_cell(Position::new(0, 2), GemType::Spawner);
//! let mut board = Board::with_seed(config, 7).unwrap();
//! board.put_initial_gems().unwrap();
//!
//! if let Some(&(a, b)) = board.legal_swaps().first() {
//!     board.swap(a, b);
//!     let delta = a.delta_to(b);
//!     board.match_lines(delta.col, delta.row);
//! }
//!
//! while !board.is_settled() {
//!     board.feed();
//!     board.fall();
//! }
//! board.advance_turn();
//! ```

pub mod grid;
pub mod state;
pub mod ops;
pub mod matching;
pub mod spawn;
pub mod gravity;
pub mod fill;

pub use grid::Grid;
pub use state::Board;
pub use ops::CrunchedGems;
pub use matching::{exists_potential_match, resolve_special_key, ComboGroup, PatternInstance};
pub use gravity::FallenGem;
