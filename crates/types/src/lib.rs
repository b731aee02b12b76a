//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the board engine.
//! All types are plain data with no I/O, making them usable in any context
//! (core logic, terminal rendering, snapshot export).
//!
//! # Board Dimensions
//!
//! Boards are rectangular and bounded:
//!
//! - **Width / height**: 1 to [`MAX_GRID_DIM`] cells each
//! - **Default board**: 10 x 10
//! - **Coordinates**: `(x, y)` with `x` growing right and `y` growing up,
//!   so row 0 is the bottom row of the rendered board
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed frame interval of the terminal runner (~60 FPS) |
//! | `DEFAULT_SHIFT_SECS` | 0.32 | Duration of one animated swap (20 frames) |
//! | `FIXED_SHIFT_STEP` | 0.05 | Per-tick progress for the frame-locked timing mode |
//!
//! # Examples
//!
//! ```
//! use skyblocks_types::{BoardAction, Direction, Placement, TileKind};
//!
//! // Palette lookup by index
//! assert_eq!(TileKind::from_index(0), Some(TileKind::Red));
//! assert_eq!(TileKind::from_str("blue"), Some(TileKind::Blue));
//!
//! // Directions map to grid deltas (up is +y)
//! assert_eq!(Direction::Up.delta(), (0, 1));
//!
//! // Input vocabulary
//! let action = BoardAction::from_str("swapLeft").unwrap();
//! assert_eq!(action, BoardAction::Swap(Direction::Left));
//!
//! // Placements interpolate linearly
//! let mid = Placement::lerp(Placement::new(0.0, 0.0, 0.0), Placement::new(2.0, 0.0, 0.0), 0.5);
//! assert_eq!(mid.x, 1.0);
//! ```

use serde::{Deserialize, Serialize};

/// Largest allowed board width or height
pub const MAX_GRID_DIM: u8 = 10;

/// Largest number of cells on a board
pub const MAX_CELLS: usize = (MAX_GRID_DIM as usize) * (MAX_GRID_DIM as usize);

/// Default board width (10 columns)
pub const DEFAULT_BOARD_WIDTH: u8 = 10;

/// Default board height (10 rows)
pub const DEFAULT_BOARD_HEIGHT: u8 = 10;

/// Default number of tile kinds in play
pub const DEFAULT_PALETTE_SIZE: u8 = 5;

/// Minimum run length that counts as a match
pub const MIN_RUN_LENGTH: u8 = 3;

/// Number of sanitization passes over a freshly generated board
pub const SANITIZE_PASSES: u8 = 2;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default duration of one animated swap, in seconds (20 frames of 16ms)
pub const DEFAULT_SHIFT_SECS: f32 = 0.32;

/// Per-tick progress used by the frame-locked timing mode
pub const FIXED_SHIFT_STEP: f32 = 0.05;

/// Progress this close to 1.0 snaps to "at rest"
pub const PROGRESS_EPSILON: f32 = 1e-4;

/// Default world-space edge length of one tile
pub const DEFAULT_TILE_SIZE: f32 = 1.0;


/// The fixed palette of tile kinds
///
/// A board configured with a palette of `n` kinds uses the first `n` entries
/// of [`TileKind::ALL`]. Only the kind takes part in match comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    White,
}

impl TileKind {
    /// Every kind, in palette order
    pub const ALL: [TileKind; 7] = [
        TileKind::Red,
        TileKind::Blue,
        TileKind::Green,
        TileKind::Yellow,
        TileKind::Purple,
        TileKind::Orange,
        TileKind::White,
    ];

    /// Look up a kind by palette index
    ///
    /// # Examples
    ///
    /// ```
    /// use skyblocks_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_index(2), Some(TileKind::Green));
    /// assert_eq!(TileKind::from_index(99), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Palette index of this kind
    pub fn index(&self) -> u8 {
        match self {
            TileKind::Red => 0,
            TileKind::Blue => 1,
            TileKind::Green => 2,
            TileKind::Yellow => 3,
            TileKind::Purple => 4,
            TileKind::Orange => 5,
            TileKind::White => 6,
        }
    }

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use skyblocks_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("red"), Some(TileKind::Red));
    /// assert_eq!(TileKind::from_str("PURPLE"), Some(TileKind::Purple));
    /// assert_eq!(TileKind::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileKind::Red),
            "blue" => Some(TileKind::Blue),
            "green" => Some(TileKind::Green),
            "yellow" => Some(TileKind::Yellow),
            "purple" => Some(TileKind::Purple),
            "orange" => Some(TileKind::Orange),
            "white" => Some(TileKind::White),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Blue => "blue",
            TileKind::Green => "green",
            TileKind::Yellow => "yellow",
            TileKind::Purple => "purple",
            TileKind::Orange => "orange",
            TileKind::White => "white",
        }
    }
}

/// Cardinal directions for cursor movement and swaps
///
/// Grid `y` grows upward, so [`Direction::Up`] is `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Grid offset `(dx, dy)` for one step in this direction
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Discrete input events accepted by the board engine
///
/// Both human input and scripted drivers use this vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardAction {
    /// Move the selection cursor one cell
    Select(Direction),
    /// Swap the selected tile with its neighbour
    Swap(Direction),
}

impl BoardAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use skyblocks_types::{BoardAction, Direction};
    ///
    /// assert_eq!(BoardAction::from_str("selectLeft"), Some(BoardAction::Select(Direction::Left)));
    /// assert_eq!(BoardAction::from_str("swapdown"), Some(BoardAction::Swap(Direction::Down)));
    /// assert_eq!(BoardAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "selectleft" => Some(BoardAction::Select(Direction::Left)),
            "selectright" => Some(BoardAction::Select(Direction::Right)),
            "selectup" => Some(BoardAction::Select(Direction::Up)),
            "selectdown" => Some(BoardAction::Select(Direction::Down)),
            "swapleft" => Some(BoardAction::Swap(Direction::Left)),
            "swapright" => Some(BoardAction::Swap(Direction::Right)),
            "swapup" => Some(BoardAction::Swap(Direction::Up)),
            "swapdown" => Some(BoardAction::Swap(Direction::Down)),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::Select(Direction::Left) => "selectLeft",
            BoardAction::Select(Direction::Right) => "selectRight",
            BoardAction::Select(Direction::Up) => "selectUp",
            BoardAction::Select(Direction::Down) => "selectDown",
            BoardAction::Swap(Direction::Left) => "swapLeft",
            BoardAction::Swap(Direction::Right) => "swapRight",
            BoardAction::Swap(Direction::Up) => "swapUp",
            BoardAction::Swap(Direction::Down) => "swapDown",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            BoardAction::Select(dir) | BoardAction::Swap(dir) => *dir,
        }
    }
}

/// Translation-only spatial placement of a tile in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Placement {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation from `a` (t = 0) to `b` (t = 1)
    pub fn lerp(a: Placement, b: Placement, t: f32) -> Placement {
        Placement {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
            z: a.z + (b.z - a.z) * t,
        }
    }
}
