//! Cube module - a single unit cell of a piece or of the locked grid
//!
//! A cube remembers its spawn-relative offset (`origin`), its accumulated
//! translation and its committed orientation. The current position is always
//! `translation + orientation * origin`. An in-progress turn only carries an
//! animation angle; it does not move the cube until it is committed.

use crate::orientation::{animated_matrix, mul_f32, Orientation};
use crate::types::{GridPos, RotateDir, TranslateDir, QUARTER_TURN_DEG};

/// A quarter turn that has started but not finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub dir: RotateDir,
    pub angle_deg: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    origin: GridPos,
    translation: GridPos,
    orientation: Orientation,
    position: GridPos,
    turn: Option<Turn>,
}

impl Cube {
    /// Cube of a freshly spawned piece: template offset placed at `anchor`.
    pub fn spawned(offset: GridPos, anchor: GridPos) -> Self {
        Self {
            origin: offset,
            translation: anchor,
            orientation: Orientation::IDENTITY,
            position: anchor + offset,
            turn: None,
        }
    }

    /// Cube copied into the locked grid.
    pub fn locked(position: GridPos) -> Self {
        Self {
            origin: GridPos::ORIGIN,
            translation: position,
            orientation: Orientation::IDENTITY,
            position,
            turn: None,
        }
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn origin(&self) -> GridPos {
        self.origin
    }

    pub fn translation(&self) -> GridPos {
        self.translation
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn turn(&self) -> Option<Turn> {
        self.turn
    }

    /// Current animation angle (0 when at rest).
    pub fn turn_angle(&self) -> u32 {
        self.turn.map_or(0, |t| t.angle_deg)
    }

    /// Position after one step in `dir`.
    pub fn translated_position(&self, dir: TranslateDir) -> GridPos {
        self.position + dir.delta()
    }

    /// Position the cube would rest at once a quarter turn in `dir` completes.
    pub fn rotated_position(&self, dir: RotateDir) -> GridPos {
        self.translation + self.orientation.then(dir).apply(self.origin)
    }

    pub fn translate(&mut self, dir: TranslateDir) {
        self.translation = self.translation + dir.delta();
        self.recompute();
    }

    /// Gravity shift applied to locked cubes above a cleared row.
    pub fn shift_down(&mut self) {
        self.translate(TranslateDir::Down);
    }

    /// Advance the animation of a turn in `dir` by `step_deg`, capped at 90°.
    ///
    /// Returns `false` if a different turn is already in progress.
    pub fn advance_turn(&mut self, dir: RotateDir, step_deg: u32) -> bool {
        match self.turn {
            Some(t) if t.dir != dir => false,
            Some(t) => {
                self.turn = Some(Turn {
                    dir,
                    angle_deg: (t.angle_deg + step_deg).min(QUARTER_TURN_DEG),
                });
                true
            }
            None => {
                self.turn = Some(Turn {
                    dir,
                    angle_deg: step_deg.min(QUARTER_TURN_DEG),
                });
                true
            }
        }
    }

    /// Promote a finished turn into the committed orientation.
    ///
    /// Returns `false` (and changes nothing) unless the turn has reached 90°.
    pub fn finish_turn(&mut self) -> bool {
        match self.turn {
            Some(t) if t.angle_deg >= QUARTER_TURN_DEG => {
                self.orientation = self.orientation.then(t.dir);
                self.turn = None;
                self.recompute();
                true
            }
            _ => false,
        }
    }

    /// Orientation including the in-progress animation.
    pub fn render_matrix(&self) -> [[f32; 3]; 3] {
        match self.turn {
            Some(t) => mul_f32(animated_matrix(t.dir, t.angle_deg), self.orientation.to_f32()),
            None => self.orientation.to_f32(),
        }
    }

    /// Interpolated cube center for drawing a turn in progress.
    pub fn render_center(&self) -> [f32; 3] {
        let m = self.render_matrix();
        let o = self.origin.to_array().map(|v| v as f32);
        let t = self.translation.to_array().map(|v| v as f32);
        let mut out = [0.0f32; 3];
        for (i, c) in out.iter_mut().enumerate() {
            *c = t[i] + (0..3).map(|k| m[i][k] * o[k]).sum::<f32>();
        }
        out
    }

    fn recompute(&mut self) {
        self.position = self.translation + self.orientation.apply(self.origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawned_position() {
        let c = Cube::spawned(GridPos::new(-1, -1, 0), GridPos::new(0, 6, 0));
        assert_eq!(c.position(), GridPos::new(-1, 5, 0));
        assert_eq!(c.turn_angle(), 0);
    }

    #[test]
    fn test_translate_moves_position() {
        let mut c = Cube::spawned(GridPos::new(1, 0, 0), GridPos::new(0, 6, 0));
        c.translate(TranslateDir::Front);
        assert_eq!(c.position(), GridPos::new(1, 6, 1));
        c.shift_down();
        assert_eq!(c.position(), GridPos::new(1, 5, 1));
    }

    #[test]
    fn test_turn_does_not_move_until_finished() {
        let mut c = Cube::spawned(GridPos::new(1, 0, 0), GridPos::new(0, 0, 0));
        assert!(c.advance_turn(RotateDir::ZPos, 30));
        assert!(!c.finish_turn());
        assert_eq!(c.position(), GridPos::new(1, 0, 0));
        assert!(c.advance_turn(RotateDir::ZPos, 30));
        assert!(c.advance_turn(RotateDir::ZPos, 30));
        assert_eq!(c.turn_angle(), 90);
        assert!(c.finish_turn());
        assert_eq!(c.position(), GridPos::new(0, 1, 0));
        assert_eq!(c.turn_angle(), 0);
    }

    #[test]
    fn test_rotated_position_matches_finished_turn() {
        let mut c = Cube::spawned(GridPos::new(-1, -1, 0), GridPos::new(2, 3, 1));
        c.translate(TranslateDir::Left);
        let expected = c.rotated_position(RotateDir::XNeg);
        for _ in 0..3 {
            c.advance_turn(RotateDir::XNeg, 30);
        }
        c.finish_turn();
        assert_eq!(c.position(), expected);
    }

    #[test]
    fn test_advance_turn_rejects_other_direction() {
        let mut c = Cube::spawned(GridPos::new(1, 0, 0), GridPos::ORIGIN);
        assert!(c.advance_turn(RotateDir::YPos, 30));
        assert!(!c.advance_turn(RotateDir::YNeg, 30));
        assert_eq!(c.turn_angle(), 30);
    }

    #[test]
    fn test_render_center_interpolates() {
        let mut c = Cube::spawned(GridPos::new(1, 0, 0), GridPos::ORIGIN);
        c.advance_turn(RotateDir::ZPos, 30);
        c.advance_turn(RotateDir::ZPos, 15);
        let [x, y, z] = c.render_center();
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!((x - h).abs() < 1e-5);
        assert!((y - h).abs() < 1e-5);
        assert!(z.abs() < 1e-5);
    }
}
