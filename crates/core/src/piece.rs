//! Pieces module - tetromino templates and rigid-body movement
//!
//! A piece is four cubes that always share one translation, one committed
//! orientation and one turn in progress. Templates are offsets from the spawn
//! anchor at the top center of the grid, so every spawned piece occupies the
//! top row and possibly the row below it.
//!
//! Pieces never lock themselves; the game state decides what a failed move
//! means.

use crate::collision::{is_out_of_bounds, Occupancy};
use crate::cube::Cube;
use crate::types::{Direction, GridBounds, GridPos, PieceKind, RotateDir, TranslateDir, QUARTER_TURN_DEG};

const fn p(x: i32, y: i32, z: i32) -> GridPos {
    GridPos::new(x, y, z)
}

/// Template offsets for a piece kind, relative to the spawn anchor.
pub fn offsets(kind: PieceKind) -> [GridPos; 4] {
    match kind {
        PieceKind::I => [p(-2, 0, 0), p(-1, 0, 0), p(0, 0, 0), p(1, 0, 0)],
        PieceKind::O => [p(-1, 0, 0), p(0, 0, 0), p(-1, -1, 0), p(0, -1, 0)],
        PieceKind::T => [p(-1, 0, 0), p(0, 0, 0), p(1, 0, 0), p(0, -1, 0)],
        PieceKind::J => [p(-1, 0, 0), p(0, 0, 0), p(1, 0, 0), p(1, -1, 0)],
        PieceKind::L => [p(-1, 0, 0), p(0, 0, 0), p(1, 0, 0), p(-1, -1, 0)],
        PieceKind::S => [p(0, 0, 0), p(1, 0, 0), p(-1, -1, 0), p(0, -1, 0)],
        PieceKind::Z => [p(-1, 0, 0), p(0, 0, 0), p(0, -1, 0), p(1, -1, 0)],
        PieceKind::TVar => [p(0, 0, 0), p(0, -1, 0), p(0, -1, 1), p(1, -1, 0)],
        PieceKind::SVar => [p(0, 0, 0), p(1, 0, 0), p(0, -1, 1), p(0, -1, 0)],
        PieceKind::ZVar => [p(-1, 0, 0), p(0, 0, 0), p(0, -1, 0), p(0, -1, 1)],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    cubes: [Cube; 4],
}

impl Piece {
    /// Place the template for `kind` at the grid's spawn anchor.
    pub fn spawn(kind: PieceKind, bounds: &GridBounds) -> Self {
        let anchor = bounds.spawn_anchor();
        Self {
            kind,
            cubes: offsets(kind).map(|o| Cube::spawned(o, anchor)),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cubes(&self) -> &[Cube; 4] {
        &self.cubes
    }

    pub fn positions(&self) -> [GridPos; 4] {
        self.cubes.map(|c| c.position())
    }

    /// Lowest occupied row.
    pub fn lowest_y(&self) -> i32 {
        self.cubes.iter().map(|c| c.position().y).min().unwrap_or_default()
    }

    /// Animation angle of the turn in progress (0 at rest).
    pub fn turn_angle(&self) -> u32 {
        self.cubes[0].turn_angle()
    }

    pub fn is_rotating(&self) -> bool {
        self.turn_angle() > 0
    }

    /// Whether one step in `dir` is legal.
    ///
    /// Fails when a cube already sits on the boundary in that direction or
    /// when the neighbouring cell is locked.
    pub fn can_translate<O: Occupancy + ?Sized>(&self, dir: TranslateDir, grid: &O, bounds: &GridBounds) -> bool {
        let limit = dir.limit(bounds);
        let axis = dir.axis();
        self.cubes.iter().all(|c| {
            c.position().get(axis) != limit && !grid.is_occupied(c.translated_position(dir))
        })
    }

    /// Move one step in `dir` if legal.
    pub fn translate<O: Occupancy + ?Sized>(&mut self, dir: TranslateDir, grid: &O, bounds: &GridBounds) -> bool {
        if !self.can_translate(dir, grid, bounds) {
            return false;
        }
        self.shift(dir);
        true
    }

    /// Move one step without any checks.
    pub(crate) fn shift(&mut self, dir: TranslateDir) {
        for c in &mut self.cubes {
            c.translate(dir);
        }
    }

    /// Whether the resting state after a quarter turn in `dir` is legal.
    pub fn can_rotate<O: Occupancy + ?Sized>(&self, dir: RotateDir, grid: &O, bounds: &GridBounds) -> bool {
        self.cubes.iter().all(|c| {
            let target = c.rotated_position(dir);
            !is_out_of_bounds(bounds, target) && !grid.is_occupied(target)
        })
    }

    /// Advance a turn in `dir` by `step_deg`.
    ///
    /// Legality is checked when the turn starts. The grid cannot change while a
    /// turn is in progress, so later steps only animate. Returns `false` if the
    /// turn is illegal or another turn is already running.
    pub fn rotate<O: Occupancy + ?Sized>(
        &mut self,
        dir: RotateDir,
        step_deg: u32,
        grid: &O,
        bounds: &GridBounds,
    ) -> bool {
        match self.cubes[0].turn() {
            Some(t) if t.dir != dir => return false,
            None if !self.can_rotate(dir, grid, bounds) => return false,
            _ => {}
        }
        for c in &mut self.cubes {
            c.advance_turn(dir, step_deg);
        }
        true
    }

    /// Commit a turn that has reached 90°.
    pub fn update_rotation_location(&mut self) -> bool {
        if self.turn_angle() < QUARTER_TURN_DEG {
            return false;
        }
        for c in &mut self.cubes {
            c.finish_turn();
        }
        true
    }

    /// Whether `direction` is a legal move right now.
    pub fn can_move<O: Occupancy + ?Sized>(&self, direction: Direction, grid: &O, bounds: &GridBounds) -> bool {
        match direction {
            Direction::Translate(dir) => self.can_translate(dir, grid, bounds),
            Direction::Rotate(dir) => self.can_rotate(dir, grid, bounds),
        }
    }
}
