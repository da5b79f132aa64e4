//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, usable from the engine, the terminal
//! front end, and any other presentation layer.
//!
//! # Board Dimensions
//!
//! - **Canonical size**: 8x8 (`BOARD_SIZE`)
//! - **Allowed sizes**: 1..=16 (`MAX_BOARD_SIZE`), fixed once a board is created
//! - **Coordinates**: `(row, col)`, row 0 at the top, col 0 at the left
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_BLOCK` | 1 | Points per scored cell |
//! | `LINE_CLEAR_BONUS` | 10 | Points per cleared line, before the combo multiplier |
//! | `PIECES_PER_ROUND` | 3 | Pieces offered per round |
//! | `MAX_DRAW_ATTEMPTS` | 10 | Full-pool draws before the small-pool fallback |
//!
//! # Examples
//!
//! ```
//! use block_blast_types::{ColorId, GameCommand, BOARD_SIZE};
//!
//! assert_eq!(ColorId::from_str("teal"), Some(ColorId::Teal));
//! assert_eq!(GameCommand::from_str("startGame"), Some(GameCommand::StartGame));
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Canonical board edge length (8 cells).
pub const BOARD_SIZE: u8 = 8;

/// Largest supported board edge length.
pub const MAX_BOARD_SIZE: usize = 16;

/// Pieces dealt per round.
pub const PIECES_PER_ROUND: usize = 3;

/// Upper bound for a configurable round size.
pub const MAX_PIECES_PER_ROUND: usize = 5;

/// Points awarded per scored cell.
pub const POINTS_PER_BLOCK: u32 = 1;

/// Points per cleared line before the combo multiplier.
pub const LINE_CLEAR_BONUS: u32 = 10;

/// Full-pool draws tried before falling back to the small pool.
pub const MAX_DRAW_ATTEMPTS: u32 = 10;

/// Default snap radius for the drag flow, in cells.
pub const SNAP_RADIUS_CELLS: f32 = 1.5;

/// Largest extent (rows or columns) of any shape in the catalog.
pub const MAX_SHAPE_SPAN: usize = 5;

/// Largest cell count of any shape in the catalog.
pub const MAX_SHAPE_CELLS: usize = 9;


/// The block palette.
///
/// Colors are drawn uniformly and independently of the shape, so every piece
/// color is always one of these six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    Lime,
    Yellow,
    Coral,
    Teal,
    Sun,
    Orange,
}

impl ColorId {
    /// Every palette entry, in draw order.
    pub const ALL: [ColorId; 6] = [
        ColorId::Lime,
        ColorId::Yellow,
        ColorId::Coral,
        ColorId::Teal,
        ColorId::Sun,
        ColorId::Orange,
    ];

    /// Parse a color name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lime" => Some(ColorId::Lime),
            "yellow" => Some(ColorId::Yellow),
            "coral" => Some(ColorId::Coral),
            "teal" => Some(ColorId::Teal),
            "sun" => Some(ColorId::Sun),
            "orange" => Some(ColorId::Orange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorId::Lime => "lime",
            ColorId::Yellow => "yellow",
            ColorId::Coral => "coral",
            ColorId::Teal => "teal",
            ColorId::Sun => "sun",
            ColorId::Orange => "orange",
        }
    }

    /// 24-bit display color as `(r, g, b)`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorId::Lime => (0x95, 0xd5, 0x24),
            ColorId::Yellow => (0xd4, 0xf5, 0x42),
            ColorId::Coral => (0xff, 0x6b, 0x6b),
            ColorId::Teal => (0x4e, 0xcd, 0xc4),
            ColorId::Sun => (0xff, 0xe6, 0x6d),
            ColorId::Orange => (0xff, 0x8c, 0x42),
        }
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(ColorId)`: Filled cell with the color of the piece that filled it
///
/// A color can only exist on a filled cell, and clearing always yields `None`.
pub type Cell = Option<ColorId>;

/// Absolute board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Session phase.
///
/// `Menu -> Playing -> GameOver -> Menu`, with `GameOver -> Playing` on restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameOver",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Discrete events for audio/haptic collaborators.
///
/// These are fire-and-forget signals; nothing in the engine waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeedbackEvent {
    GameStarted,
    PiecePickedUp,
    PiecePlaced,
    LinesCleared { lines: u32 },
    Combo { lines: u32, multiplier: u32 },
    InvalidPlacement,
    GameOver { score: u32, new_high_score: bool },
}

/// Session-level commands a presentation layer can issue.
///
/// Placement carries coordinates and goes through `attempt_place` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Start (or restart) a game
    StartGame,
    /// Abandon the current game and return to the menu
    ResetGame,
    /// Return to the menu from any screen
    ExitToMenu,
    /// Toggle the audio sink
    ToggleSound,
    /// Toggle the haptic sink
    ToggleHaptics,
}

impl GameCommand {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("startGame"), Some(GameCommand::StartGame));
    /// assert_eq!(GameCommand::from_str("toggleHaptics"), Some(GameCommand::ToggleHaptics));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "startgame" => Some(GameCommand::StartGame),
            "resetgame" => Some(GameCommand::ResetGame),
            "exittomenu" => Some(GameCommand::ExitToMenu),
            "togglesound" => Some(GameCommand::ToggleSound),
            "togglehaptics" => Some(GameCommand::ToggleHaptics),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::StartGame => "startGame",
            GameCommand::ResetGame => "resetGame",
            GameCommand::ExitToMenu => "exitToMenu",
            GameCommand::ToggleSound => "toggleSound",
            GameCommand::ToggleHaptics => "toggleHaptics",
        }
    }
}
