//! Scoring module - cell points plus a triangular line-clear combo
//!
//! A turn scores either the blocks it placed (no clear) or the cells it
//! cleared, plus `n * line_clear_bonus * n(n+1)/2` for `n` completed lines.
//! All arithmetic saturates.

use serde::{Deserialize, Serialize};

use crate::types::{LINE_CLEAR_BONUS, POINTS_PER_BLOCK};

/// Tunable score constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub points_per_block: u32,
    pub line_clear_bonus: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            points_per_block: POINTS_PER_BLOCK,
            line_clear_bonus: LINE_CLEAR_BONUS,
        }
    }
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Points from placed or cleared cells.
    pub block_points: u32,
    /// `lines * line_clear_bonus`, before the multiplier.
    pub line_score: u32,
    /// Triangular combo multiplier; 0 when nothing cleared.
    pub multiplier: u32,
    /// `line_score * multiplier`.
    pub total_line_score: u32,
    pub total: u32,
}

/// Triangular number `n(n+1)/2`.
pub fn combo_multiplier(lines: u32) -> u32 {
    lines.saturating_mul(lines.saturating_add(1)) / 2
}

impl ScoreRules {
    /// Score one turn.
    ///
    /// `blocks_placed` counts cells the piece filled and `cleared_cells` the
    /// distinct cells emptied by the clear. Cell points use the cleared cells
    /// whenever `lines > 0`.
    pub fn calculate(&self, blocks_placed: u32, lines: u32, cleared_cells: u32) -> ScoreResult {
        if lines == 0 {
            let block_points = blocks_placed.saturating_mul(self.points_per_block);
            return ScoreResult {
                block_points,
                total: block_points,
                ..ScoreResult::default()
            };
        }

        let block_points = cleared_cells.saturating_mul(self.points_per_block);
        let multiplier = combo_multiplier(lines);
        let line_score = lines.saturating_mul(self.line_clear_bonus);
        let total_line_score = line_score.saturating_mul(multiplier);

        ScoreResult {
            block_points,
            line_score,
            multiplier,
            total_line_score,
            total: block_points.saturating_add(total_line_score),
        }
    }
}
