//! Game state module - the session controller
//!
//! Ties together the board, the offered set, the round generator, scoring, and
//! the injected collaborators. Every turn is a single `&mut self` call that
//! runs placement, clearing, scoring, refill, and the game-over check to
//! completion before returning a [`TurnResult`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, CompleteLines, PlacedCells};
use crate::config::GameConfig;
use crate::error::PlaceError;
use crate::pieces::{all_used, OfferedSet, Piece};
use crate::ports::{FeedbackSink, HighScoreStore, MemoryHighScoreStore, NullFeedback};
use crate::round::{RoundDraw, RoundGenerator};
use crate::scoring::ScoreRules;
use crate::snapshot::{ComboEvent, GameSnapshot, RefillInfo, TurnOutcome, TurnResult};
use crate::types::{CellPos, FeedbackEvent, GameCommand, GamePhase};

/// Complete session state
pub struct GameState<R = SmallRng> {
    config: GameConfig,
    rules: ScoreRules,
    board: Board,
    offered: OfferedSet,
    generator: RoundGenerator<R>,
    phase: GamePhase,
    score: u32,
    high_score: u32,
    /// Monotonic episode id (increments on every start).
    episode_id: u32,
    last_placed: PlacedCells,
    clearing: CompleteLines,
    combo: Option<ComboEvent>,
    sound_enabled: bool,
    haptics_enabled: bool,
    store: Box<dyn HighScoreStore>,
    audio: Box<dyn FeedbackSink>,
    haptics: Box<dyn FeedbackSink>,
}

impl GameState<SmallRng> {
    /// Create a session seeded from `config.seed`, or from entropy when unset.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameState<R> {
    /// Create a session drawing pieces from `rng`.
    ///
    /// Starts in `Menu` with an in-memory high-score store and silent sinks.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let config = config.normalized();
        Self {
            rules: config.rules(),
            board: Board::new(config.board_size),
            offered: OfferedSet::new(),
            generator: RoundGenerator::with_limits(
                rng,
                config.pieces_per_round,
                config.max_draw_attempts,
            ),
            config,
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            episode_id: 0,
            last_placed: PlacedCells::new(),
            clearing: CompleteLines::default(),
            combo: None,
            sound_enabled: true,
            haptics_enabled: true,
            store: Box::new(MemoryHighScoreStore::default()),
            audio: Box::new(NullFeedback),
            haptics: Box::new(NullFeedback),
        }
    }

    /// Attach a persistence collaborator and load the high score from it.
    pub fn with_store(mut self, store: impl HighScoreStore + 'static) -> Self {
        self.store = Box::new(store);
        self.high_score = self.store.load_high_score();
        log::debug!("loaded high score {}", self.high_score);
        self
    }

    pub fn with_audio(mut self, sink: impl FeedbackSink + 'static) -> Self {
        self.audio = Box::new(sink);
        self
    }

    pub fn with_haptics(mut self, sink: impl FeedbackSink + 'static) -> Self {
        self.haptics = Box::new(sink);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn offered(&self) -> &[Piece] {
        &self.offered
    }

    pub fn piece(&self, index: usize) -> Option<&Piece> {
        self.offered.get(index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn haptics_enabled(&self) -> bool {
        self.haptics_enabled
    }

    /// Cells filled by the last successful placement.
    pub fn last_placed_cells(&self) -> &[CellPos] {
        &self.last_placed
    }

    /// Lines cleared by the last successful placement, kept for animation.
    pub fn clearing(&self) -> &CompleteLines {
        &self.clearing
    }

    pub fn combo(&self) -> Option<ComboEvent> {
        self.combo
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the offered set, keeping at most `MAX_PIECES_PER_ROUND` pieces.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_offered(&mut self, pieces: impl IntoIterator<Item = Piece>) {
        self.offered.clear();
        for piece in pieces {
            if self.offered.try_push(piece).is_err() {
                break;
            }
        }
    }

    /// Forward an event to the enabled sinks.
    pub fn notify(&mut self, event: FeedbackEvent) {
        if self.sound_enabled {
            self.audio.notify(event);
        }
        if self.haptics_enabled {
            self.haptics.notify(event);
        }
    }

    /// Start a new game from `Menu` or `GameOver`; ignored while playing.
    pub fn start_game(&mut self) {
        if self.phase.is_playing() {
            return;
        }

        self.flush();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = GamePhase::Playing;
        self.deal();
        log::info!("game started (episode {})", self.episode_id);
        self.notify(FeedbackEvent::GameStarted);
        self.check_game_over();
    }

    /// Abandon the current game and return to the menu.
    pub fn reset_game(&mut self) {
        self.record_high_score();
        self.flush();
        if self.phase != GamePhase::Menu {
            log::info!("returning to menu from {}", self.phase.as_str());
        }
        self.phase = GamePhase::Menu;
    }

    /// Return to the menu from any phase.
    pub fn exit_to_menu(&mut self) {
        self.reset_game();
    }

    /// Returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Returns the new setting.
    pub fn toggle_haptics(&mut self) -> bool {
        self.haptics_enabled = !self.haptics_enabled;
        self.haptics_enabled
    }

    pub fn apply_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::StartGame => self.start_game(),
            GameCommand::ResetGame => self.reset_game(),
            GameCommand::ExitToMenu => self.exit_to_menu(),
            GameCommand::ToggleSound => {
                self.toggle_sound();
            }
            GameCommand::ToggleHaptics => {
                self.toggle_haptics();
            }
        }
    }

    /// Place offered piece `index` with its top-left cell at (row, col).
    ///
    /// A rejected request changes nothing.
    pub fn attempt_place(&mut self, index: usize, row: i16, col: i16) -> TurnResult {
        if !self.phase.is_playing() {
            return TurnResult::rejected(PlaceError::NotPlaying, self.phase);
        }
        let piece = match self.offered.get(index) {
            Some(piece) if piece.is_used() => {
                return TurnResult::rejected(PlaceError::PieceAlreadyUsed, self.phase)
            }
            Some(piece) => *piece,
            None => return TurnResult::rejected(PlaceError::PieceIndexOutOfRange, self.phase),
        };

        let placed_cells = match self.board.try_place(&piece, row, col) {
            Ok(cells) => cells,
            Err(reason) => {
                log::debug!("rejected piece {index} at ({row}, {col}): {reason}");
                return TurnResult::rejected(reason, self.phase);
            }
        };
        self.offered[index].mark_used();
        self.notify(FeedbackEvent::PiecePlaced);

        let cleared = self.board.find_complete_lines();
        let cleared_cells = self.board.clear_lines(&cleared.rows, &cleared.cols) as u32;
        let lines = cleared.total() as u32;
        let score = self
            .rules
            .calculate(placed_cells.len() as u32, lines, cleared_cells);
        self.score = self.score.saturating_add(score.total);

        let combo = (lines > 1).then_some(ComboEvent {
            lines,
            multiplier: score.multiplier,
        });
        if lines > 0 {
            self.notify(FeedbackEvent::LinesCleared { lines });
        }
        if let Some(combo) = combo {
            self.notify(FeedbackEvent::Combo {
                lines: combo.lines,
                multiplier: combo.multiplier,
            });
        }
        log::debug!(
            "placed piece {index} at ({row}, {col}): {lines} lines, +{} -> {}",
            score.total,
            self.score
        );

        let refill = if all_used(&self.offered) {
            let draw = self.deal();
            Some(RefillInfo {
                attempts: draw.attempts,
                used_fallback: draw.used_fallback,
            })
        } else {
            None
        };

        self.last_placed = placed_cells.clone();
        self.clearing = cleared.clone();
        self.combo = combo;
        self.check_game_over();

        TurnResult {
            outcome: TurnOutcome::Placed,
            placed_cells,
            cleared,
            cleared_cells,
            score,
            combo,
            refill,
            phase: self.phase,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.size = self.board.size();
        self.board.write_grid(&mut out.board);
        out.offered.clear();
        out.offered.extend_from_slice(&self.offered);
        out.score = self.score;
        out.high_score = self.high_score;
        out.last_placed_cells.clear();
        out.last_placed_cells.extend_from_slice(&self.last_placed);
        out.clearing_rows.clear();
        out.clearing_rows.extend_from_slice(&self.clearing.rows);
        out.clearing_cols.clear();
        out.clearing_cols.extend_from_slice(&self.clearing.cols);
        out.combo = self.combo;
        out.sound_enabled = self.sound_enabled;
        out.haptics_enabled = self.haptics_enabled;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn deal(&mut self) -> RoundDraw {
        let draw = self.generator.generate(&self.board);
        self.offered = draw.pieces.clone();
        draw
    }

    fn check_game_over(&mut self) {
        if !self.phase.is_playing() || self.board.can_place_any_piece(&self.offered) {
            return;
        }

        self.phase = GamePhase::GameOver;
        let new_high_score = self.record_high_score();
        log::info!(
            "game over (episode {}): score {}, high score {}",
            self.episode_id,
            self.score,
            self.high_score
        );
        self.notify(FeedbackEvent::GameOver {
            score: self.score,
            new_high_score,
        });
    }

    // Idempotent: a second call with the same score is a no-op.
    fn record_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        self.store.save_high_score(self.score);
        true
    }

    fn flush(&mut self) {
        self.board.reset();
        self.offered.clear();
        self.score = 0;
        self.last_placed.clear();
        self.clearing = CompleteLines::default();
        self.combo = None;
    }
}
