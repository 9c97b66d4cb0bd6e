//! GameView: maps a core `Scene` into a terminal framebuffer.
//!
//! The prism is shown as three orthographic projections side by side:
//!
//! - **FRONT**: X across, Y up, seen from +Z
//! - **SIDE**: Z across, Y up, seen from +X
//! - **TOP**: X across, Z down, seen from +Y
//!
//! In each projection the nearest locked cube wins and is shaded brighter the
//! closer it is. The falling piece is always drawn on top, at its animated
//! position.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Scene, SceneCube};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GridBounds, GridPos, Message, SessionStatus};

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

/// One orthographic view of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Front,
    Side,
    Top,
}

impl Projection {
    pub const ALL: [Projection; 3] = [Projection::Front, Projection::Side, Projection::Top];

    pub fn title(self) -> &'static str {
        match self {
            Projection::Front => "FRONT",
            Projection::Side => "SIDE",
            Projection::Top => "TOP",
        }
    }

    /// `(columns, rows)` in grid cells.
    pub fn size(self, b: &GridBounds) -> (u16, u16) {
        let (w, h, d) = b.size();
        let (c, r) = match self {
            Projection::Front => (w, h),
            Projection::Side => (d, h),
            Projection::Top => (w, d),
        };
        (c as u16, r as u16)
    }

    /// Screen cell and depth (larger is nearer) of a grid position.
    pub fn project(self, b: &GridBounds, p: GridPos) -> Option<(u16, u16, i32)> {
        if !b.contains(p) {
            return None;
        }
        let (col, row, depth) = match self {
            Projection::Front => (p.x - b.x_min, b.y_max - p.y, p.z),
            Projection::Side => (p.z - b.z_min, b.y_max - p.y, p.x),
            Projection::Top => (p.x - b.x_min, p.z - b.z_min, p.y),
        };
        Some((col as u16, row as u16, depth))
    }

    fn depth_range(self, b: &GridBounds) -> (i32, i32) {
        match self {
            Projection::Front => (b.z_min, b.z_max),
            Projection::Side => (b.x_min, b.x_max),
            Projection::Top => (b.y_min, b.y_max),
        }
    }
}

const BG: Rgb = Rgb::new(30, 30, 40);
const GAP: u16 = 1;

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    /// Nearest depth drawn per projected cell, reused across frames.
    depth: Vec<i32>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            depth: Vec::new(),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of one projection frame, border included.
    pub fn frame_size(&self, proj: Projection, b: &GridBounds) -> (u16, u16) {
        let (c, r) = proj.size(b);
        (c * self.cell_w + 2, r * self.cell_h + 2)
    }

    /// Top-left corner of each projection frame.
    pub fn layout(&self, b: &GridBounds, viewport: Viewport) -> [(u16, u16); 3] {
        let (fw, fh) = self.frame_size(Projection::Front, b);
        let (sw, _) = self.frame_size(Projection::Side, b);
        let (tw, _) = self.frame_size(Projection::Top, b);
        let total_w = fw + GAP + sw + GAP + tw;
        let x0 = viewport.width.saturating_sub(total_w + PANEL_W) / 2;
        let y0 = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(fh) / 2,
            AnchorY::Top => 0,
        };
        [
            (x0, y0),
            (x0 + fw + GAP, y0),
            (x0 + fw + GAP + sw + GAP, y0),
        ]
    }

    /// Render a scene into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&mut self, scene: &Scene, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let b = scene.bounds;
        let origins = self.layout(&b, viewport);
        for (proj, (ox, oy)) in Projection::ALL.into_iter().zip(origins) {
            self.draw_projection(fb, scene, proj, ox, oy);
        }

        let (tx, ty) = origins[2];
        let (tw, _) = self.frame_size(Projection::Top, &b);
        let panel_x = tx.saturating_add(tw).saturating_add(2);
        self.draw_side_panel(fb, scene, viewport, panel_x, ty);

        let (fx, fy) = origins[0];
        let (fw, fh) = self.frame_size(Projection::Front, &b);
        if let Some(text) = overlay_text(scene) {
            draw_overlay_text(fb, fx, fy, fw, fh, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&mut self, scene: &Scene, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_projection(&mut self, fb: &mut FrameBuffer, scene: &Scene, proj: Projection, ox: u16, oy: u16) {
        let b = scene.bounds;
        let (cols, rows) = proj.size(&b);
        let (fw, fh) = self.frame_size(proj, &b);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(ox + 1, oy + 1, fw - 2, fh - 2, ' ', CellStyle::new(BG, BG));
        fb.draw_box(ox, oy, fw, fh, proj.title(), border);
        let empty = CellStyle::new(Rgb::new(90, 90, 100), BG).dim();
        for r in 0..rows {
            for c in 0..cols {
                self.fill_cell_rect(fb, ox, oy, c, r, '·', empty);
            }
        }

        self.depth.clear();
        self.depth.resize(cols as usize * rows as usize, i32::MIN);
        let (near_min, near_max) = proj.depth_range(&b);
        for cube in &scene.locked {
            let Some((c, r, depth)) = proj.project(&b, cube.position) else {
                continue;
            };
            let i = r as usize * cols as usize + c as usize;
            if depth <= self.depth[i] {
                continue;
            }
            self.depth[i] = depth;
            let style = CellStyle::new(shade(cube, depth, near_min, near_max), BG);
            self.fill_cell_rect(fb, ox, oy, c, r, '▓', style);
        }

        for cube in &scene.active {
            let p = cube.center.map(|v| v.round() as i32);
            if let Some((c, r, _)) = proj.project(&b, GridPos::from_array(p)) {
                let style = CellStyle::new(cube.color, BG).bold();
                self.fill_cell_rect(fb, ox, oy, c, r, '█', style);
            }
        }
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, col: u16, row: u16, ch: char, style: CellStyle) {
        let px = ox + 1 + col * self.cell_w;
        let py = oy + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, scene: &Scene, viewport: Viewport, panel_x: u16, start_y: u16) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, v) in [("SCORE", scene.score), ("LEVEL", scene.level), ("LINES", scene.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, status_text(scene.status), label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, scene.message.text(), value);
        y = y.saturating_add(2);

        let help = value.dim();
        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

const PANEL_W: u16 = 16;

const HELP: [&str; 7] = [
    "←→↓ z x  move",
    "space    drop",
    "⇧←→ ⇧↑↓  turn X/Y",
    "Z X      turn Z",
    "enter    start",
    "p r e    pause/reset/end",
    "q        quit",
];

fn shade(cube: &SceneCube, depth: i32, near_min: i32, near_max: i32) -> Rgb {
    let span = (near_max - near_min).max(1);
    let t = (depth - near_min) as f32 / span as f32;
    let scale = 0.45 + 0.55 * t;
    let c = cube.color;
    Rgb::new(
        (c.r as f32 * scale) as u8,
        (c.g as f32 * scale) as u8,
        (c.b as f32 * scale) as u8,
    )
}

fn status_text(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Idle => "READY",
        SessionStatus::Running => "PLAYING",
        SessionStatus::Paused => "PAUSED",
        SessionStatus::GameOver => "GAME OVER",
        SessionStatus::Won => "WON",
    }
}

fn overlay_text(scene: &Scene) -> Option<&'static str> {
    match scene.status {
        SessionStatus::Idle => Some("PRESS ENTER"),
        SessionStatus::Paused => Some("PAUSED"),
        SessionStatus::GameOver if scene.message == Message::Ended => Some("ENDED"),
        SessionStatus::GameOver => Some("GAME OVER"),
        SessionStatus::Won => Some("YOU WIN"),
        SessionStatus::Running => None,
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let mid_y = y.saturating_add(h / 2);
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(tx, mid_y, text, style);
}
