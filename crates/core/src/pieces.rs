//! Pieces module - polyomino shapes, the shape catalog, and offered pieces
//!
//! Shapes are `'static` offset lists validated at compile time: every catalog
//! entry is non-empty, duplicate-free, and stored in its minimal bounding box.
//! Offsets are `(row, col)` relative to the top-left of that box.

use arrayvec::ArrayVec;
use rand::Rng;
use serde::Serialize;

use crate::types::{ColorId, MAX_PIECES_PER_ROUND, MAX_SHAPE_CELLS, MAX_SHAPE_SPAN};

/// Offset of a single block relative to the shape origin, as `(row, col)`.
pub type CellOffset = (u8, u8);

/// Unique id of a dealt piece instance.
pub type PieceId = u32;

/// The pieces currently offered to the player.
pub type OfferedSet = ArrayVec<Piece, MAX_PIECES_PER_ROUND>;

/// Immutable occupancy matrix of a polyomino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    cells: &'static [CellOffset],
    height: u8,
    width: u8,
}

impl Shape {
    /// Build a shape from its filled offsets.
    ///
    /// Panics (at compile time when used in a `const`) if the list is empty,
    /// contains duplicates, or does not touch row 0 and column 0.
    pub const fn new(cells: &'static [CellOffset]) -> Self {
        assert!(!cells.is_empty(), "shape needs at least one cell");
        assert!(cells.len() <= MAX_SHAPE_CELLS, "shape exceeds MAX_SHAPE_CELLS");

        let mut min_row = u8::MAX;
        let mut min_col = u8::MAX;
        let mut max_row = 0u8;
        let mut max_col = 0u8;
        let mut i = 0;
        while i < cells.len() {
            let (r, c) = cells[i];
            if r < min_row {
                min_row = r;
            }
            if c < min_col {
                min_col = c;
            }
            if r > max_row {
                max_row = r;
            }
            if c > max_col {
                max_col = c;
            }

            let mut j = i + 1;
            while j < cells.len() {
                assert!(
                    !(cells[j].0 == r && cells[j].1 == c),
                    "shape lists a cell twice"
                );
                j += 1;
            }
            i += 1;
        }

        assert!(
            min_row == 0 && min_col == 0,
            "shape must sit in its minimal bounding box"
        );
        assert!(
            (max_row as usize) < MAX_SHAPE_SPAN && (max_col as usize) < MAX_SHAPE_SPAN,
            "shape exceeds MAX_SHAPE_SPAN"
        );

        Self {
            cells,
            height: max_row + 1,
            width: max_col + 1,
        }
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Filled offsets in declaration order.
    pub fn cells(&self) -> &'static [CellOffset] {
        self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        self.cells.iter().any(|&(r, c)| r == row && c == col)
    }

    /// Row-major boolean matrix view, `height` rows of `width` entries.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|r| (0..self.width).map(|c| self.is_filled(r, c)).collect())
            .collect()
    }
}

pub const MONO: Shape = Shape::new(&[(0, 0)]);
pub const DOMINO_H: Shape = Shape::new(&[(0, 0), (0, 1)]);
pub const DOMINO_V: Shape = Shape::new(&[(0, 0), (1, 0)]);
pub const LINE3_H: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2)]);
pub const LINE3_V: Shape = Shape::new(&[(0, 0), (1, 0), (2, 0)]);
pub const LINE4_H: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2), (0, 3)]);
pub const LINE4_V: Shape = Shape::new(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
pub const LINE5_H: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
pub const LINE5_V: Shape = Shape::new(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
pub const SQUARE2: Shape = Shape::new(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
pub const SQUARE3: Shape = Shape::new(&[
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
]);
pub const RECT_2X3: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
pub const RECT_3X2: Shape = Shape::new(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);

pub const L_UP: Shape = Shape::new(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
pub const L_RIGHT: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2), (1, 0)]);
pub const L_DOWN: Shape = Shape::new(&[(0, 0), (0, 1), (1, 1), (2, 1)]);
pub const L_LEFT: Shape = Shape::new(&[(0, 2), (1, 0), (1, 1), (1, 2)]);

pub const J_UP: Shape = Shape::new(&[(0, 1), (1, 1), (2, 0), (2, 1)]);
pub const J_RIGHT: Shape = Shape::new(&[(0, 0), (1, 0), (1, 1), (1, 2)]);
pub const J_DOWN: Shape = Shape::new(&[(0, 0), (0, 1), (1, 0), (2, 0)]);
pub const J_LEFT: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2), (1, 2)]);

pub const S_H: Shape = Shape::new(&[(0, 1), (0, 2), (1, 0), (1, 1)]);
pub const S_V: Shape = Shape::new(&[(0, 0), (1, 0), (1, 1), (2, 1)]);
pub const Z_H: Shape = Shape::new(&[(0, 0), (0, 1), (1, 1), (1, 2)]);
pub const Z_V: Shape = Shape::new(&[(0, 1), (1, 0), (1, 1), (2, 0)]);

pub const T_DOWN: Shape = Shape::new(&[(0, 0), (0, 1), (0, 2), (1, 1)]);
pub const T_UP: Shape = Shape::new(&[(0, 1), (1, 0), (1, 1), (1, 2)]);
pub const T_RIGHT: Shape = Shape::new(&[(0, 0), (1, 0), (1, 1), (2, 0)]);
pub const T_LEFT: Shape = Shape::new(&[(0, 1), (1, 0), (1, 1), (2, 1)]);

pub const CORNER_BL: Shape = Shape::new(&[(0, 0), (1, 0), (1, 1)]);
pub const CORNER_TL: Shape = Shape::new(&[(0, 0), (0, 1), (1, 0)]);
pub const CORNER_TR: Shape = Shape::new(&[(0, 0), (0, 1), (1, 1)]);
pub const CORNER_BR: Shape = Shape::new(&[(0, 1), (1, 0), (1, 1)]);

const FULL_POOL: &[Shape] = &[
    MONO, DOMINO_H, DOMINO_V, LINE3_H, LINE3_V, LINE4_H, LINE4_V, LINE5_H, LINE5_V, SQUARE2,
    SQUARE3, RECT_2X3, RECT_3X2, L_UP, L_RIGHT, L_DOWN, L_LEFT, J_UP, J_RIGHT, J_DOWN, J_LEFT,
    S_H, S_V, Z_H, Z_V, T_DOWN, T_UP, T_RIGHT, T_LEFT, CORNER_BL, CORNER_TL, CORNER_TR,
    CORNER_BR,
];

// Small shapes fit a crowded board far more often; only used as a fallback.
const SMALL_POOL: &[Shape] = &[MONO, DOMINO_H, DOMINO_V, LINE3_H, LINE3_V];

/// Every shape a regular draw can produce.
pub fn full_pool() -> &'static [Shape] {
    FULL_POOL
}

/// Fallback pool of small shapes, a strict subset of [`full_pool`].
pub fn small_pool() -> &'static [Shape] {
    SMALL_POOL
}

/// A dealt piece: shape plus color and usage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    id: PieceId,
    shape: Shape,
    color: ColorId,
    used: bool,
}

impl Piece {
    pub fn new(id: PieceId, shape: Shape, color: ColorId) -> Self {
        Self {
            id,
            shape,
            color,
            used: false,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> ColorId {
        self.color
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub(crate) fn mark_used(&mut self) {
        self.used = true;
    }

    /// Offsets the shape fills, relative to the placement anchor.
    pub fn filled_cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        self.shape.cells().iter().copied()
    }
}

/// Draw one piece with a uniformly chosen shape and an independently chosen color.
///
/// `pool` and `palette` must be non-empty.
pub fn random_piece_from<R: Rng + ?Sized>(
    pool: &[Shape],
    palette: &[ColorId],
    id: PieceId,
    rng: &mut R,
) -> Piece {
    debug_assert!(!pool.is_empty() && !palette.is_empty());
    let shape = pool[rng.gen_range(0..pool.len())];
    let color = palette[rng.gen_range(0..palette.len())];
    Piece::new(id, shape, color)
}

/// True when every piece in the set has been placed.
pub fn all_used(pieces: &[Piece]) -> bool {
    pieces.iter().all(Piece::is_used)
}
