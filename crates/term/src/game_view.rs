//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ElementKind, GameEvent, Position, GRID_COLS, GRID_ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the element game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed inside the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_feedback(snap, None, viewport, fb);
    }

    /// Same as [`GameView::render_into`], plus a feedback line for the latest event.
    pub fn render_into_with_feedback(
        &self,
        snap: &GameSnapshot,
        feedback: Option<GameEvent>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (GRID_COLS as u16) * self.cell_w;
        let board_px_h = (GRID_ROWS as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h + 1) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        // Settled cells.
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let kind = snap.grid[row as usize][col as usize];
                if kind.is_occupied() {
                    self.draw_element(fb, frame, row as i8, col as i8, kind, false);
                } else {
                    self.draw_empty_cell(fb, frame, row as i8, col as i8);
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_row) = snap.ghost_row {
                let ghost = Piece {
                    anchor: Position::new(ghost_row, active.anchor.col),
                    ..active
                };
                let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                for (pos, _) in ghost.cells() {
                    self.fill_cell(fb, frame, pos.row, pos.col, '░', style);
                }
            }
            for (pos, kind) in active.cells() {
                self.draw_element(fb, frame, pos.row, pos.col, kind, true);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(event) = feedback {
            self.draw_feedback(fb, frame, event);
        }

        if snap.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
            let hint = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
            let text = "r: restart";
            let x = frame.x + frame.w.saturating_sub(text.len() as u16) / 2;
            fb.put_str(x, frame.y + frame.h / 2 + 1, text, hint);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_feedback(
        &self,
        snap: &GameSnapshot,
        feedback: Option<GameEvent>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_feedback(snap, feedback, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, row: i8, col: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell(fb, frame, row, col, '·', style);
    }

    fn draw_element(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i8,
        col: i8,
        kind: ElementKind,
        falling: bool,
    ) {
        let style = CellStyle::new(element_color(kind), BOARD_BG);
        let style = if falling { style.bold() } else { style };
        self.fill_cell(fb, frame, row, col, element_glyph(kind), style);
    }

    /// Paint one board cell; cells outside the grid (e.g. above row 0) are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i8,
        col: i8,
        ch: char,
        style: CellStyle,
    ) {
        if row < 0 || col < 0 || row >= GRID_ROWS as i8 || col >= GRID_COLS as i8 {
            return;
        }
        let px = frame.x + 1 + col as u16 * self.cell_w;
        let py = frame.y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_i64(panel_x, y + 1, snap.score, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y + 1, snap.tick_interval_ms, value);
        fb.put_str(end, y + 1, "ms", dim);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for piece in snap.upcoming.iter().flatten() {
            if y >= viewport.height {
                break;
            }
            let kind = piece.element();
            let style = CellStyle::new(element_color(kind), PANEL_BG);
            fb.put_char(panel_x, y, element_glyph(kind), style);
            fb.put_char(panel_x + 1, y, element_glyph(kind), style);
            if panel_w >= 16 {
                fb.put_str(panel_x + 3, y, kind.as_str(), dim);
            }
            y = y.saturating_add(1);
        }
    }

    fn draw_feedback(&self, fb: &mut FrameBuffer, frame: Frame, event: GameEvent) {
        let y = frame.y.saturating_add(frame.h);
        let style = CellStyle::new(feedback_color(event), PANEL_BG).bold();
        let mut x = frame.x;
        match event {
            GameEvent::RowsCleared { count, combo } => {
                x = fb.put_u32(x, y, u32::from(count), style);
                x = fb.put_str(x, y, if count == 1 { " row" } else { " rows" }, style);
                if combo > 0 {
                    x = fb.put_str(x, y, " combo x", style);
                    fb.put_u32(x, y, combo + 1, style);
                }
            }
            _ => {
                if let Some(text) = feedback_text(event) {
                    fb.put_str(x, y, text, style);
                }
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

pub fn element_color(kind: ElementKind) -> Rgb {
    match kind {
        ElementKind::Fire => Rgb::new(0xFF, 0x45, 0x00),
        ElementKind::Water => Rgb::new(0x00, 0xBF, 0xFF),
        ElementKind::Rock => Rgb::new(0x80, 0x80, 0x80),
        ElementKind::Dynamite => Rgb::new(0xDC, 0x14, 0x3C),
        ElementKind::None => Rgb::new(0, 0, 0),
    }
}

pub fn element_glyph(kind: ElementKind) -> char {
    match kind {
        ElementKind::Fire => '▲',
        ElementKind::Water => '≈',
        ElementKind::Rock => '█',
        ElementKind::Dynamite => '✱',
        ElementKind::None => ' ',
    }
}

/// One-line message for an event; None for events without feedback text
pub fn feedback_text(event: GameEvent) -> Option<&'static str> {
    match event {
        GameEvent::ElementExtinguished => Some("Extinguished! +20"),
        GameEvent::RockDestroyed => Some("Rock destroyed! +50"),
        GameEvent::DynamiteWasted => Some("Dynamite wasted -10"),
        GameEvent::RowsCleared { .. } => Some("Row cleared!"),
        GameEvent::GameOver => Some("Game over"),
        GameEvent::Restarted => Some("New game"),
        GameEvent::PieceMoved { .. }
        | GameEvent::PieceRotated { .. }
        | GameEvent::HardDropped { .. }
        | GameEvent::PieceLocked
        | GameEvent::PauseToggled { .. } => None,
    }
}

fn feedback_color(event: GameEvent) -> Rgb {
    match event {
        GameEvent::ElementExtinguished => element_color(ElementKind::Water),
        GameEvent::RockDestroyed => element_color(ElementKind::Rock),
        GameEvent::DynamiteWasted | GameEvent::GameOver => element_color(ElementKind::Dynamite),
        GameEvent::RowsCleared { .. } => Rgb::new(240, 220, 80),
        _ => Rgb::new(220, 220, 220),
    }
}
