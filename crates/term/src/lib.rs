//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a simple framebuffer that is diffed and flushed
//! to the terminal through crossterm.

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use bell::TerminalBell;
pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, PlacementView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
