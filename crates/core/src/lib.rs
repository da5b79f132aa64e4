//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the puzzle rules and the session state machine. It has
//! no dependencies on rendering, input, or file I/O; persistence and feedback
//! reach it only through the traits in [`ports`].
//!
//! # Module Structure
//!
//! - [`board`]: square grid with placement validation and line clearing
//! - [`pieces`]: compile-time validated shape catalog and dealt pieces
//! - [`round`]: anti-frustration generation of the offered set
//! - [`scoring`]: cell points plus the triangular line-clear combo
//! - [`game_state`]: the session controller tying everything together
//! - [`ports`]: high-score and feedback collaborator traits
//!
//! # Game Rules
//!
//! - The player is offered three pieces at a time and places them in any order.
//! - Every full row and every full column clears in the same turn.
//! - A new set is dealt only once all three pieces are used.
//! - The game ends as soon as no unused piece fits anywhere.
//!
//! # Example
//!
//! ```
//! use block_blast_core::rand::rngs::mock::StepRng;
//! use block_blast_core::{GameConfig, GameState};
//! use block_blast_types::GamePhase;
//!
//! // A constant random source deals 1x1 pieces only.
//! let mut game = GameState::with_rng(GameConfig::default(), StepRng::new(0, 0));
//! game.start_game();
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! let turn = game.attempt_place(0, 3, 4);
//! assert!(turn.is_placed());
//! assert_eq!(game.score(), 1);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod ports;
pub mod round;
pub mod scoring;
pub mod snapshot;

pub use block_blast_types as types;
pub use rand;

// Re-export commonly used types for convenience
pub use board::{Board, CompleteLines, PlacedCells};
pub use config::GameConfig;
pub use error::PlaceError;
pub use game_state::GameState;
pub use pieces::{full_pool, random_piece_from, small_pool, OfferedSet, Piece, PieceId, Shape};
pub use ports::{FeedbackSink, HighScoreStore, MemoryHighScoreStore, NullFeedback};
pub use round::{RoundDraw, RoundGenerator};
pub use scoring::{combo_multiplier, ScoreResult, ScoreRules};
pub use snapshot::{ComboEvent, GameSnapshot, RefillInfo, TurnOutcome, TurnResult};
