//! Terminal board renderer.
//!
//! A small, game-oriented rendering layer: views draw a board snapshot into a
//! plain framebuffer, and the renderer flushes only what changed to the
//! terminal. No widget toolkit is involved.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw tiles at their animated placement, not just their cell
//! - Allow precise control over aspect ratio (e.g. 4 columns by 2 rows per tile)

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use skyblocks_core as core;
pub use skyblocks_types as types;

pub use board_view::{kind_color, AnchorY, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, RenderStats, TerminalRenderer};
