//! BoardView: maps a [`BoardSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Tiles are drawn at their interpolated world placement, so a swap in
//! progress shows both tiles sliding between cells. World `+y` is up while
//! terminal rows grow downward; the projection flips the vertical axis.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Placement, TileKind};

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

/// Frame origin and board size in terminal cells, shared by the draw passes
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    cols: u8,
    rows: u8,
    tile_size: f32,
}

/// A lightweight terminal renderer for the tile board.
pub struct BoardView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps tiles square-ish and leaves room to show motion.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl BoardView {
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

    /// Render the board into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = snap.width as u16 * self.cell_w;
        let board_px_h = snap.height as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let layout = Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            frame_w,
            frame_h,
            cols: snap.width,
            rows: snap.height,
            tile_size: snap.tile_size,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(layout.start_x + 1, layout.start_y + 1, board_px_w, board_px_h, ' ', bg);
        fb.draw_box(layout.start_x, layout.start_y, frame_w, frame_h, border);

        // Cleared cells first, then resting tiles, then moving tiles on top.
        for tile in snap.tiles.iter().filter(|t| !t.active) {
            self.draw_empty_cell(fb, &layout, tile.x, tile.y);
        }
        for tile in snap.tiles.iter().filter(|t| t.active && t.progress >= 1.0) {
            self.draw_tile(fb, &layout, tile.placement, tile.kind, tile.selected);
        }
        for tile in snap.tiles.iter().filter(|t| t.active && t.progress < 1.0) {
            self.draw_tile(fb, &layout, tile.placement, tile.kind, tile.selected);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if !snap.tiles.is_empty() && snap.active_count() == 0 {
            self.draw_overlay_text(fb, &layout, "BOARD CLEARED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Top-left terminal cell for a tile drawn at `placement`
    fn project(&self, layout: &Layout, placement: Placement) -> (u16, u16) {
        let half_w = (layout.cols as f32 - 1.0) * 0.5;
        let half_h = (layout.rows as f32 - 1.0) * 0.5;
        let fx = placement.x / layout.tile_size + half_w;
        let fy = placement.y / layout.tile_size + half_h;

        let max_col = (layout.cols as u16 - 1) * self.cell_w;
        let max_row = (layout.rows as u16 - 1) * self.cell_h;
        let col = (fx * self.cell_w as f32).round().clamp(0.0, max_col as f32) as u16;
        let row = ((layout.rows as f32 - 1.0 - fy) * self.cell_h as f32)
            .round()
            .clamp(0.0, max_row as f32) as u16;

        (layout.start_x + 1 + col, layout.start_y + 1 + row)
    }

    fn cell_origin(&self, layout: &Layout, x: i8, y: i8) -> (u16, u16) {
        let flipped = layout.rows as i16 - 1 - y as i16;
        (
            layout.start_x + 1 + x.max(0) as u16 * self.cell_w,
            layout.start_y + 1 + flipped.max(0) as u16 * self.cell_h,
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let (px, py) = self.cell_origin(layout, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', style);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        placement: Placement,
        kind: TileKind,
        selected: bool,
    ) {
        let (px, py) = self.project(layout, placement);
        let color = kind_color(kind);

        if !selected {
            let style = CellStyle::new(color, BOARD_BG).bold();
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            return;
        }

        // Selected: solid background with bracket markers on each row.
        let style = CellStyle::new(Rgb::new(255, 255, 255), color).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        if self.cell_w >= 2 {
            for dy in 0..self.cell_h {
                fb.put_char(px, py + dy, '[', style);
                fb.put_char(px + self.cell_w - 1, py + dy, ']', style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "CLEARED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.cleared, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ACTIVE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.active_count() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SEED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.seed, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, if snap.shifting { "SHIFTING" } else { "IDLE" }, value);
        y = y.saturating_add(2);

        for line in ["ARROWS select", "WASD   swap", "R      restart", "Q      quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Display colour of a tile kind
pub fn kind_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Red => Rgb::new(220, 80, 80),
        TileKind::Blue => Rgb::new(80, 120, 220),
        TileKind::Green => Rgb::new(100, 220, 120),
        TileKind::Yellow => Rgb::new(240, 220, 80),
        TileKind::Purple => Rgb::new(200, 120, 220),
        TileKind::Orange => Rgb::new(255, 165, 0),
        TileKind::White => Rgb::new(235, 235, 235),
    }
}
