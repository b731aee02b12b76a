//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds the whole tile-matching engine: the grid, match detection,
//! initial board sanitization and the select/swap/shift state machine. It has
//! no terminal or I/O dependencies, so the same engine drives the terminal
//! front-end, headless tests and benchmarks.
//!
//! # Module Structure
//!
//! - [`grid`]: bounded rectangular board holding one tile per cell
//! - [`tile`]: per-tile kind, flags, coordinates and shift animation
//! - [`matcher`]: scan for horizontal and vertical same-kind runs
//! - [`sanitize`]: random initial kinds plus match-breaking passes
//! - [`engine`]: selection cursor, swaps, shift timing and match resolution
//! - [`config`]: engine parameters and their environment overrides
//! - [`rng`]: small seedable generator so boards are reproducible
//! - [`snapshot`]: read-only copies of board state for renderers
//!
//! # Rules
//!
//! - A run is `min_run_length` (default 3) active, same-kind tiles in a row or
//!   column. Diagonals never match.
//! - Matched tiles are deactivated. There is no gravity and no refill.
//! - A swap commits to the grid at once; the two tiles then animate toward
//!   their new cells and all input is rejected until both arrive.
//!
//! # Example
//!
//! ```
//! use skyblocks_core::{BoardConfig, BoardEngine};
//!
//! let mut board = BoardEngine::new(BoardConfig::new(6, 6, 4).with_seed(12345)).unwrap();
//! assert_eq!(board.selected(), (0, 0));
//!
//! board.select_right();
//! if board.swap_up() {
//!     assert!(board.is_shifting());
//! }
//!
//! // Drive the animation with elapsed seconds per frame.
//! for _ in 0..30 {
//!     board.tick(0.016);
//! }
//! assert!(!board.is_shifting());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod sanitize;
pub mod snapshot;
pub mod tile;

pub use skyblocks_types as types;

// Re-export commonly used types for convenience
pub use config::{BoardConfig, ShiftTiming};
pub use engine::{BoardEngine, MatchEvent, ShiftState};
pub use error::{BoardError, Result};
pub use grid::Grid;
pub use matcher::{count_runs, find_runs, Axis, Run, RunScanner};
pub use rng::SimpleRng;
pub use sanitize::{randomize, sanitize};
pub use snapshot::{BoardSnapshot, TileSnapshot};
pub use tile::{Tile, TileId};
