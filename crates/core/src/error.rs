//! Error types for the board engine.
//!
//! Rejected input (a select or swap whose preconditions fail) is not an error
//! and never shows up here; those calls simply return `false`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    /// Grid access outside `[0, width) x [0, height)`.
    ///
    /// Public engine operations pre-validate coordinates, so seeing this from
    /// the engine means an internal invariant was broken.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i8,
        y: i8,
        width: u8,
        height: u8,
    },

    /// Invalid construction parameters, refused before any board exists.
    #[error("invalid board configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
