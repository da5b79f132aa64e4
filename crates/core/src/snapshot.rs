use serde::Serialize;

use crate::board::{CompleteLines, PlacedCells};
use crate::error::PlaceError;
use crate::pieces::Piece;
use crate::scoring::ScoreResult;
use crate::types::{Cell, CellPos, GamePhase};

/// Whether a placement request changed the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "camelCase")]
pub enum TurnOutcome {
    Placed,
    Rejected(PlaceError),
}

/// Multi-line clear reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComboEvent {
    pub lines: u32,
    pub multiplier: u32,
}

/// Present when the turn exhausted the offered set and a new one was dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefillInfo {
    pub attempts: u32,
    pub used_fallback: bool,
}

/// Everything one `attempt_place` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub outcome: TurnOutcome,
    pub placed_cells: PlacedCells,
    /// Lines detected and cleared this turn.
    pub cleared: CompleteLines,
    /// Distinct cells emptied by the clear.
    pub cleared_cells: u32,
    pub score: ScoreResult,
    pub combo: Option<ComboEvent>,
    pub refill: Option<RefillInfo>,
    /// Phase after the turn.
    pub phase: GamePhase,
}

impl TurnResult {
    pub(crate) fn rejected(reason: PlaceError, phase: GamePhase) -> Self {
        Self {
            outcome: TurnOutcome::Rejected(reason),
            placed_cells: PlacedCells::new(),
            cleared: CompleteLines::default(),
            cleared_cells: 0,
            score: ScoreResult::default(),
            combo: None,
            refill: None,
            phase,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.outcome == TurnOutcome::Placed
    }

    pub fn rejection(&self) -> Option<PlaceError> {
        match self.outcome {
            TurnOutcome::Placed => None,
            TurnOutcome::Rejected(reason) => Some(reason),
        }
    }

    pub fn lines_cleared(&self) -> usize {
        self.cleared.total()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Read-only view of a session for rendering and serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub size: u8,
    pub board: Vec<Vec<Cell>>,
    pub offered: Vec<Piece>,
    pub score: u32,
    pub high_score: u32,
    pub last_placed_cells: Vec<CellPos>,
    pub clearing_rows: Vec<u8>,
    pub clearing_cols: Vec<u8>,
    pub combo: Option<ComboEvent>,
    pub sound_enabled: bool,
    pub haptics_enabled: bool,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase.is_playing()
    }

    /// Cell at (row, col), `None` when empty or out of range.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn is_clearing(&self, row: usize, col: usize) -> bool {
        self.clearing_rows.iter().any(|&r| r as usize == row)
            || self.clearing_cols.iter().any(|&c| c as usize == col)
    }
}
