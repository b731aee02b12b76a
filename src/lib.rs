//! Skyblocks (workspace facade crate).
//!
//! Re-exports the board engine and its terminal front-end so callers can use
//! `skyblocks::{core,input,term,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use skyblocks_core as core;
pub use skyblocks_input as input;
pub use skyblocks_term as term;
pub use skyblocks_types as types;
