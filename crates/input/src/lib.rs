//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::BoardAction`] plus the
//! two out-of-band commands (restart and quit) the runner handles itself.

pub mod map;

pub use skyblocks_types as types;

pub use map::{handle_key_event, is_press, is_restart, should_quit};
