//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, MAX_SHAPE_SPAN};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const INVALID: Rgb = Rgb::new(220, 60, 60);
const HELP: &str = "1-5 pick  arrows move  enter drop  esc cancel  v sound  b haptics  q quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Keyboard cursor and drag state drawn on top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementView {
    pub cursor: (i16, i16),
    /// Tray slot of the piece being held.
    pub held: Option<usize>,
    /// Anchor the held piece would land on, and whether it is legal.
    pub preview: Option<(i16, i16, bool)>,
}

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

struct Layout {
    board_x: u16,
    board_y: u16,
    frame_w: u16,
    frame_h: u16,
    panel_x: u16,
    tray_y: u16,
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        placement: &PlacementView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let layout = self.layout(snap.size, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.board_x + 1,
            layout.board_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        fb.draw_box(layout.board_x, layout.board_y, layout.frame_w, layout.frame_h, border);

        self.draw_board(fb, snap, &layout);
        if snap.playable() {
            self.draw_placement(fb, snap, placement, &layout);
        }
        self.draw_side_panel(fb, snap, viewport, &layout);
        self.draw_tray(fb, snap, placement, viewport, &layout);

        match snap.phase {
            GamePhase::Menu => {
                self.draw_overlay(fb, &layout, &["BLOCK BLAST", "", "N  new game", "Q  quit"]);
            }
            GamePhase::GameOver => {
                let best = if snap.score > 0 && snap.score == snap.high_score {
                    "NEW BEST!"
                } else {
                    ""
                };
                self.draw_overlay(fb, &layout, &["GAME OVER", best, "N  again", "M  menu"]);
            }
            GamePhase::Playing => {}
        }

        if viewport.height > 0 {
            let dim = CellStyle::new(Rgb::new(120, 120, 130), PANEL_BG);
            fb.put_str(0, viewport.height - 1, HELP, dim);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        placement: &PlacementView,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, placement, viewport, &mut fb);
        fb
    }

    /// Screen position of the top-left glyph of board cell (row, col).
    pub fn cell_origin(&self, size: u8, viewport: Viewport, row: u16, col: u16) -> (u16, u16) {
        self.cell_xy(&self.layout(size, viewport), row, col)
    }

    fn layout(&self, size: u8, viewport: Viewport) -> Layout {
        let frame_w = size as u16 * self.cell_w + 2;
        let frame_h = size as u16 * self.cell_h + 2;
        let panel_w = 14;
        let total_w = frame_w + 2 + panel_w;
        let total_h = frame_h + 1 + MAX_SHAPE_SPAN as u16 + 1;

        let board_x = viewport.width.saturating_sub(total_w) / 2;
        let board_y = viewport.height.saturating_sub(total_h + 1) / 2;
        Layout {
            board_x,
            board_y,
            frame_w,
            frame_h,
            panel_x: board_x + frame_w + 2,
            tray_y: board_y + frame_h + 1,
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let size = snap.size as usize;
        for row in 0..size {
            for col in 0..size {
                let (ch, style) = match snap.cell(row, col) {
                    Some(color) => {
                        let placed = snap
                            .last_placed_cells
                            .iter()
                            .any(|p| p.row as usize == row && p.col as usize == col);
                        let style = CellStyle::new(color.into(), BOARD_BG);
                        ('█', if placed { style.bold() } else { style })
                    }
                    None if snap.is_clearing(row, col) => {
                        ('░', CellStyle::new(Rgb::new(250, 250, 250), BOARD_BG))
                    }
                    None => ('·', CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim()),
                };
                self.fill_cell(fb, layout, row as i16, col as i16, ch, style);
            }
        }
    }

    fn draw_placement(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        placement: &PlacementView,
        layout: &Layout,
    ) {
        let held = placement.held.and_then(|i| snap.offered.get(i));
        match (held, placement.preview) {
            (Some(piece), Some((row, col, valid))) => {
                let fg = if valid { piece.color().into() } else { INVALID };
                let style = CellStyle::new(fg, BOARD_BG);
                for (dr, dc) in piece.filled_cells() {
                    let (r, c) = (row + dr as i16, col + dc as i16);
                    if self.in_board(snap, r, c) {
                        self.fill_cell(fb, layout, r, c, '▒', style);
                    }
                }
            }
            _ => {
                let (row, col) = placement.cursor;
                if self.in_board(snap, row, col) {
                    let style = CellStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
                    let (x, y) = self.cell_xy(layout, row as u16, col as u16);
                    fb.put_char(x, y, '[', style);
                    fb.put_char(x + self.cell_w - 1, y, ']', style);
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout.panel_x;
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.board_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(panel_x, y + 1, snap.high_score, value);
        y += 3;

        if let Some(combo) = snap.combo {
            let x = fb.put_str(panel_x, y, "COMBO x", label);
            fb.put_u32(x, y, combo.multiplier, label);
        }
        y += 2;

        let toggle = |on: bool| if on { "on" } else { "off" };
        let x = fb.put_str(panel_x, y, "sound   ", value);
        fb.put_str(x, y, toggle(snap.sound_enabled), value);
        let x = fb.put_str(panel_x, y + 1, "haptics ", value);
        fb.put_str(x, y + 1, toggle(snap.haptics_enabled), value);
    }

    fn draw_tray(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        placement: &PlacementView,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let slot_w = MAX_SHAPE_SPAN as u16 * self.cell_w + 2;
        for (i, piece) in snap.offered.iter().enumerate() {
            let x = layout.board_x + i as u16 * slot_w;
            if x >= viewport.width {
                break;
            }
            let selected = placement.held == Some(i);
            let label = if selected {
                CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(220, 220, 220)).bold()
            } else {
                CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG)
            };
            fb.put_u32(x, layout.tray_y, i as u32 + 1, label);
            self.draw_mini_piece(fb, piece, x, layout.tray_y + 1);
        }
    }

    fn draw_mini_piece(&self, fb: &mut FrameBuffer, piece: &Piece, x: u16, y: u16) {
        let style = if piece.is_used() {
            CellStyle::new(Rgb::from(piece.color()).scaled(1, 4), PANEL_BG).dim()
        } else {
            CellStyle::new(piece.color().into(), PANEL_BG)
        };
        let ch = if piece.is_used() { '░' } else { '█' };
        for (dr, dc) in piece.filled_cells() {
            let px = x + dc as u16 * self.cell_w;
            let py = y + dr as u16;
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = (layout.board_y + layout.frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let text_w = text.chars().count() as u16;
            let x = layout.board_x + layout.frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }

    fn in_board(&self, snap: &GameSnapshot, row: i16, col: i16) -> bool {
        let size = snap.size as i16;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    fn cell_xy(&self, layout: &Layout, row: u16, col: u16) -> (u16, u16) {
        (
            layout.board_x + 1 + col * self.cell_w,
            layout.board_y + 1 + row * self.cell_h,
        )
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        row: i16,
        col: i16,
        ch: char,
        style: CellStyle,
    ) {
        let (x, y) = self.cell_xy(layout, row as u16, col as u16);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }
}
