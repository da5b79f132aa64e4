//! Terminal input module.
//!
//! Maps `crossterm` key events onto session commands and cursor actions. The
//! crate knows nothing about the board; the game loop interprets the actions.

pub mod map;

pub use block_blast_types as types;

pub use map::{map_key, should_quit, InputAction};
