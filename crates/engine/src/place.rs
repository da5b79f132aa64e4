//! Interactive placement: pick a piece up, hover it near the board, drop it.
//!
//! Pointer positions are fractional cell coordinates of the piece's top-left
//! corner. While hovering, the preview snaps to the nearest legal anchor
//! within the snap radius.

use block_blast_core::rand::Rng;
use block_blast_core::{Board, GameState, Shape, TurnResult};
use block_blast_types::{CellPos, FeedbackEvent, SNAP_RADIUS_CELLS};

/// Where the dragged piece would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    pub row: i16,
    pub col: i16,
    /// True when dropping here would commit the piece.
    pub valid: bool,
}

/// Nearest legal anchor to (`near_row`, `near_col`) by Euclidean distance.
///
/// Anchors further than `radius` cells are ignored. Equal distances prefer the
/// lower row, then the lower column.
pub fn find_best_placement(
    board: &Board,
    shape: &Shape,
    near_row: f32,
    near_col: f32,
    radius: f32,
) -> Option<CellPos> {
    let size = board.size() as i16;
    let max_row = size - shape.height() as i16;
    let max_col = size - shape.width() as i16;

    let mut best: Option<(f32, CellPos)> = None;
    for row in 0..=max_row {
        for col in 0..=max_col {
            let dist = (row as f32 - near_row).hypot(col as f32 - near_col);
            if dist > radius {
                continue;
            }
            // Row-major scan with a strict comparison keeps the earliest tie.
            if best.map_or(false, |(d, _)| dist >= d) {
                continue;
            }
            if board.can_place(shape, row, col) {
                best = Some((dist, CellPos::new(row as u8, col as u8)));
            }
        }
    }
    best.map(|(_, pos)| pos)
}

/// Drag state for one pointer.
#[derive(Debug, Clone)]
pub struct DragController {
    dragged: Option<usize>,
    preview: Option<Preview>,
    radius: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(SNAP_RADIUS_CELLS)
    }
}

impl DragController {
    pub fn new(radius: f32) -> Self {
        Self {
            dragged: None,
            preview: None,
            radius: radius.max(0.0),
        }
    }

    /// Index of the piece being dragged.
    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn preview(&self) -> Option<Preview> {
        self.preview
    }

    /// Start dragging offered piece `index`.
    ///
    /// Fails when the game is not in progress or the piece is missing or used.
    pub fn pick_up<R: Rng>(&mut self, state: &mut GameState<R>, index: usize) -> bool {
        if !state.phase().is_playing() {
            return false;
        }
        match state.piece(index) {
            Some(piece) if !piece.is_used() => {}
            _ => return false,
        }

        self.dragged = Some(index);
        self.preview = None;
        state.notify(FeedbackEvent::PiecePickedUp);
        true
    }

    /// Move the dragged piece near (`near_row`, `near_col`), snapping when possible.
    pub fn hover<R: Rng>(
        &mut self,
        state: &GameState<R>,
        near_row: f32,
        near_col: f32,
    ) -> Option<Preview> {
        let piece = state.piece(self.dragged?)?;
        let preview = match find_best_placement(
            state.board(),
            piece.shape(),
            near_row,
            near_col,
            self.radius,
        ) {
            Some(pos) => Preview {
                row: pos.row as i16,
                col: pos.col as i16,
                valid: true,
            },
            None => Preview {
                row: near_row.round() as i16,
                col: near_col.round() as i16,
                valid: false,
            },
        };
        self.preview = Some(preview);
        self.preview
    }

    /// Put the dragged piece exactly at (row, col) without snapping.
    pub fn set_preview<R: Rng>(
        &mut self,
        state: &GameState<R>,
        row: i16,
        col: i16,
    ) -> Option<Preview> {
        let piece = state.piece(self.dragged?)?;
        self.preview = Some(Preview {
            row,
            col,
            valid: state.board().can_place(piece.shape(), row, col),
        });
        self.preview
    }

    /// Release the dragged piece.
    ///
    /// A valid preview goes through `attempt_place`. Otherwise the piece goes
    /// back to the tray, `InvalidPlacement` is emitted, and `None` is returned.
    pub fn drop_piece<R: Rng>(&mut self, state: &mut GameState<R>) -> Option<TurnResult> {
        let index = self.dragged.take()?;
        let preview = self.preview.take();

        match preview {
            Some(Preview {
                row,
                col,
                valid: true,
            }) => {
                let turn = state.attempt_place(index, row, col);
                if !turn.is_placed() {
                    state.notify(FeedbackEvent::InvalidPlacement);
                }
                Some(turn)
            }
            _ => {
                state.notify(FeedbackEvent::InvalidPlacement);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
        self.preview = None;
    }
}
