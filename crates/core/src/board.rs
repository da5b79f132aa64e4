//! Board module - manages the game grid
//!
//! The board is a square grid where each cell is empty or filled with a color.
//! Uses flat row-major storage sized once at creation.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.
//! Anchors are signed so callers can probe positions partly off the board.

use arrayvec::ArrayVec;

use crate::error::PlaceError;
use crate::pieces::{Piece, Shape};
use crate::types::{Cell, CellPos, BOARD_SIZE, MAX_BOARD_SIZE, MAX_SHAPE_CELLS};

/// Absolute cells filled by one placement.
pub type PlacedCells = ArrayVec<CellPos, MAX_SHAPE_CELLS>;

/// Completed rows and columns found by a single scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteLines {
    pub rows: ArrayVec<u8, MAX_BOARD_SIZE>,
    pub cols: ArrayVec<u8, MAX_BOARD_SIZE>,
}

impl CompleteLines {
    /// Number of completed lines (rows plus columns).
    pub fn total(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// The game board - `size x size` cells using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board; `size` is clamped to `1..=MAX_BOARD_SIZE`.
    pub fn new(size: u8) -> Self {
        let size = size.clamp(1, MAX_BOARD_SIZE as u8);
        Self {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Empty board of the canonical size.
    pub fn standard() -> Self {
        Self::new(BOARD_SIZE)
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        let size = self.size as i16;
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }
        Some(row as usize * self.size as usize + col as usize)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Overwrite one cell; returns false if out of bounds.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Validate a placement without touching the board.
    ///
    /// Stops at the first offending cell.
    pub fn check_place(&self, shape: &Shape, row: i16, col: i16) -> Result<(), PlaceError> {
        for &(dr, dc) in shape.cells() {
            match self.get(row + dr as i16, col + dc as i16) {
                None => return Err(PlaceError::OutOfBounds),
                Some(Some(_)) => return Err(PlaceError::Occupied),
                Some(None) => {}
            }
        }
        Ok(())
    }

    pub fn can_place(&self, shape: &Shape, row: i16, col: i16) -> bool {
        self.check_place(shape, row, col).is_ok()
    }

    /// Check and commit a piece, returning the absolute cells it filled.
    ///
    /// The board is left untouched on error.
    pub fn try_place(&mut self, piece: &Piece, row: i16, col: i16) -> Result<PlacedCells, PlaceError> {
        self.check_place(piece.shape(), row, col)?;
        Ok(self.place(piece, row, col))
    }

    // Caller has already validated the anchor.
    fn place(&mut self, piece: &Piece, row: i16, col: i16) -> PlacedCells {
        let mut placed = PlacedCells::new();
        for (dr, dc) in piece.filled_cells() {
            let r = row + dr as i16;
            let c = col + dc as i16;
            if let Some(idx) = self.index(r, c) {
                self.cells[idx] = Some(piece.color());
                placed.push(CellPos::new(r as u8, c as u8));
            }
        }
        placed
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: u8) -> bool {
        if row >= self.size {
            return false;
        }
        let width = self.size as usize;
        let start = row as usize * width;
        self.cells[start..start + width].iter().all(Option::is_some)
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: u8) -> bool {
        if col >= self.size {
            return false;
        }
        self.cells
            .iter()
            .skip(col as usize)
            .step_by(self.size as usize)
            .all(Option::is_some)
    }

    /// Scan rows and columns independently for completed lines.
    pub fn find_complete_lines(&self) -> CompleteLines {
        let mut lines = CompleteLines::default();
        for i in 0..self.size {
            if self.is_row_full(i) {
                lines.rows.push(i);
            }
            if self.is_col_full(i) {
                lines.cols.push(i);
            }
        }
        lines
    }

    /// Clear the given rows and columns, returning the size of their union.
    ///
    /// Every cell in the union counts, whatever it held; a cell at a
    /// row/column intersection is counted once. Out-of-range indices are ignored.
    pub fn clear_lines(&mut self, rows: &[u8], cols: &[u8]) -> usize {
        let size = self.size;
        let mut cleared = 0;
        for r in 0..size {
            let row_hit = rows.contains(&r);
            for c in 0..size {
                if !(row_hit || cols.contains(&c)) {
                    continue;
                }
                let idx = r as usize * size as usize + c as usize;
                self.cells[idx] = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// True if the shape fits at some anchor on the board.
    pub fn fits_anywhere(&self, shape: &Shape) -> bool {
        let size = self.size as i16;
        let max_row = size - shape.height() as i16;
        let max_col = size - shape.width() as i16;
        (0..=max_row).any(|r| (0..=max_col).any(|c| self.can_place(shape, r, c)))
    }

    /// True if any unused piece fits anywhere.
    pub fn can_place_any_piece(&self, pieces: &[Piece]) -> bool {
        pieces
            .iter()
            .filter(|p| !p.is_used())
            .any(|p| self.fits_anywhere(p.shape()))
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size as usize)
    }

    /// Copy the grid into a nested row vector, reusing `out`'s allocations.
    pub fn write_grid(&self, out: &mut Vec<Vec<Cell>>) {
        let size = self.size as usize;
        out.resize_with(size, Vec::new);
        out.truncate(size);
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{LINE3_H, MONO, SQUARE2};
    use crate::types::ColorId;

    fn fill_row(board: &mut Board, row: i16) {
        for c in 0..board.size() as i16 {
            board.set(row, c, Some(ColorId::Coral));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::standard();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 7), Some(7));
        assert_eq!(board.index(1, 0), Some(8));
        assert_eq!(board.index(7, 7), Some(63));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(0, 8), None);
        assert_eq!(board.index(8, 0), None);
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(Board::new(0).size(), 1);
        assert_eq!(Board::new(40).size(), MAX_BOARD_SIZE as u8);
        assert_eq!(Board::new(10).cells().len(), 100);
    }

    #[test]
    fn test_check_place_reports_first_violation() {
        let mut board = Board::standard();
        assert_eq!(board.check_place(&SQUARE2, 7, 0), Err(PlaceError::OutOfBounds));
        assert_eq!(board.check_place(&MONO, -1, 3), Err(PlaceError::OutOfBounds));

        board.set(3, 4, Some(ColorId::Teal));
        assert_eq!(board.check_place(&LINE3_H, 3, 2), Err(PlaceError::Occupied));
        assert!(board.can_place(&LINE3_H, 3, 5));
    }

    #[test]
    fn test_try_place_commits_and_blocks_repeat() {
        let mut board = Board::standard();
        let piece = Piece::new(1, SQUARE2, ColorId::Sun);

        let placed = board.try_place(&piece, 2, 3).unwrap();
        assert_eq!(placed.len(), 4);
        assert!(placed.contains(&CellPos::new(3, 4)));
        assert_eq!(board.get(2, 3), Some(Some(ColorId::Sun)));
        assert_eq!(board.filled_count(), 4);

        assert_eq!(board.try_place(&piece, 2, 3), Err(PlaceError::Occupied));
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_find_and_clear_union() {
        let mut board = Board::standard();
        fill_row(&mut board, 2);
        for r in 0..8 {
            board.set(r, 5, Some(ColorId::Lime));
        }

        let lines = board.find_complete_lines();
        assert_eq!(lines.rows.as_slice(), &[2]);
        assert_eq!(lines.cols.as_slice(), &[5]);
        assert_eq!(lines.total(), 2);

        assert_eq!(board.clear_lines(&lines.rows, &lines.cols), 15);
        assert_eq!(board.filled_count(), 0);
        assert!(board.find_complete_lines().is_empty());
    }

    #[test]
    fn test_clear_lines_counts_whole_union() {
        let mut board = Board::standard();
        board.set(2, 0, Some(ColorId::Teal));
        board.set(5, 3, Some(ColorId::Teal));
        board.set(6, 6, Some(ColorId::Sun));

        assert_eq!(board.clear_lines(&[2], &[3]), 15);
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.get(6, 6), Some(Some(ColorId::Sun)));
        assert_eq!(board.clear_lines(&[9], &[]), 0);
    }

    #[test]
    fn test_can_place_any_piece_skips_used() {
        let mut board = Board::new(2);
        board.set(0, 0, Some(ColorId::Orange));

        let square = Piece::new(1, SQUARE2, ColorId::Lime);
        let mut mono = Piece::new(2, MONO, ColorId::Lime);
        assert!(!board.can_place_any_piece(&[square]));
        assert!(board.can_place_any_piece(&[square, mono]));

        mono.mark_used();
        assert!(!board.can_place_any_piece(&[square, mono]));
    }

    #[test]
    fn test_write_grid_and_reset() {
        let mut board = Board::new(3);
        board.set(1, 2, Some(ColorId::Yellow));

        let mut grid = Vec::new();
        board.write_grid(&mut grid);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1], vec![None, None, Some(ColorId::Yellow)]);

        board.reset();
        assert_eq!(board.filled_count(), 0);
    }
}
