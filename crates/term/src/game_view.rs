//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, ShapeMatrix};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, BOARD_HEIGHT, BOARD_WIDTH};

pub const GAME_OVER_TEXT: &str = "Game Over!";
pub const RESTART_TEXT: &str = "Press Enter to Restart";
pub const NEXT_LABEL: &str = "Next Piece:";

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';

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

/// Palette color of a block
pub fn color_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Cyan => Rgb::new(0, 255, 255),
        BlockColor::Blue => Rgb::new(0, 0, 255),
        BlockColor::Orange => Rgb::new(255, 165, 0),
        BlockColor::Yellow => Rgb::new(255, 255, 0),
        BlockColor::Green => Rgb::new(0, 128, 0),
        BlockColor::Purple => Rgb::new(128, 0, 128),
        BlockColor::Red => Rgb::new(255, 0, 0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the falling-block game.
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

    /// Terminal position of the board frame's top-left corner
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells with the active piece drawn over them.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match BlockColor::from_cell_code(snap.visible_code(x as usize, y as usize)) {
                    Some(color) => self.draw_block(fb, start_x, start_y, x, y, color),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.is_game_over() {
            draw_game_over(fb, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, start_x + 1, start_y + 1, x, y, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: BlockColor,
    ) {
        let style = CellStyle::new(color_rgb(color), BOARD_BG).bold();
        self.fill_cell_rect(fb, start_x + 1, start_y + 1, x, y, BLOCK, style);
    }

    /// Fill one board cell; `(origin_x, origin_y)` is the terminal position of cell (0, 0)
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin_x + cell_x * self.cell_w;
        let py = origin_y + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        if viewport.width - panel_x < NEXT_LABEL.len() as u16 {
            return;
        }

        let text = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);

        let mut y = start_y.saturating_add(1);
        let x = fb.put_str(panel_x, y, "Score: ", text);
        fb.put_u32(x, y, snap.score, text);
        y = y.saturating_add(2);

        let x = fb.put_str(panel_x, y, "Level: ", text);
        fb.put_u32(x, y, snap.level, text);
        y = y.saturating_add(2);

        let x = fb.put_str(panel_x, y, "Lines: ", text);
        fb.put_u32(x, y, snap.lines, text);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, NEXT_LABEL, text);
        y = y.saturating_add(2);
        self.draw_preview(fb, panel_x, y, &snap.next.matrix, snap.next.color);
    }

    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        matrix: &ShapeMatrix,
        color: BlockColor,
    ) {
        let style = CellStyle::new(color_rgb(color), SCREEN_BG).bold();
        for (dx, dy) in matrix.filled_cells() {
            self.fill_cell_rect(fb, x, y, dx as u16, dy as u16, BLOCK, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

/// Centered "Game Over!" with the restart hint two rows below
fn draw_game_over(fb: &mut FrameBuffer, viewport: Viewport) {
    let mid_y = viewport.height / 2;
    let title = CellStyle::new(color_rgb(BlockColor::Red), SCREEN_BG).bold();
    let hint = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);

    put_centered(fb, viewport, mid_y, GAME_OVER_TEXT, title);
    put_centered(fb, viewport, mid_y.saturating_add(2), RESTART_TEXT, hint);
}

fn put_centered(fb: &mut FrameBuffer, viewport: Viewport, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = viewport.width.saturating_sub(text_w) / 2;
    fb.put_str(x, y, text, style);
}
