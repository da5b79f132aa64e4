//! Game configuration with canonical defaults.

use serde::{Deserialize, Serialize};

use crate::scoring::ScoreRules;
use crate::types::{
    BOARD_SIZE, LINE_CLEAR_BONUS, MAX_BOARD_SIZE, MAX_DRAW_ATTEMPTS, MAX_PIECES_PER_ROUND,
    PIECES_PER_ROUND, POINTS_PER_BLOCK, SNAP_RADIUS_CELLS,
};

/// Rule and session parameters.
///
/// Missing fields deserialize to their canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: u8,
    pub pieces_per_round: usize,
    pub points_per_block: u32,
    pub line_clear_bonus: u32,
    pub max_draw_attempts: u32,
    /// Snap search radius in cells for the drag flow.
    pub snap_radius: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            pieces_per_round: PIECES_PER_ROUND,
            points_per_block: POINTS_PER_BLOCK,
            line_clear_bonus: LINE_CLEAR_BONUS,
            max_draw_attempts: MAX_DRAW_ATTEMPTS,
            snap_radius: SNAP_RADIUS_CELLS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Clamp every field into its supported range.
    pub fn normalized(mut self) -> Self {
        self.board_size = self.board_size.clamp(1, MAX_BOARD_SIZE as u8);
        self.pieces_per_round = self.pieces_per_round.clamp(1, MAX_PIECES_PER_ROUND);
        self.max_draw_attempts = self.max_draw_attempts.max(1);
        if !self.snap_radius.is_finite() || self.snap_radius < 0.0 {
            self.snap_radius = SNAP_RADIUS_CELLS;
        }
        self
    }

    pub fn rules(&self) -> ScoreRules {
        ScoreRules {
            points_per_block: self.points_per_block,
            line_clear_bonus: self.line_clear_bonus,
        }
    }
}
