//! Orientation module - exact cube rotations
//!
//! A committed orientation is a 3x3 signed permutation matrix with determinant
//! +1. Every composition of quarter turns about the grid axes stays inside this
//! 24-element group, so the logic path never needs floating-point rounding.
//!
//! The float matrices produced by [`animated_matrix`] exist only for rendering
//! an in-progress turn.

use crate::types::{Axis, GridPos, RotateDir};

/// Signed permutation matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation([[i8; 3]; 3]);

impl Orientation {
    pub const IDENTITY: Orientation = Orientation([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    /// The +90° or -90° turn about one axis.
    pub fn quarter_turn(dir: RotateDir) -> Self {
        let m = match dir.axis() {
            Axis::X => [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
            Axis::Y => [[0, 0, 1], [0, 1, 0], [-1, 0, 0]],
            Axis::Z => [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
        };
        let turn = Orientation(m);
        if dir.is_positive() {
            turn
        } else {
            turn.transpose()
        }
    }

    /// Build from raw entries, rejecting anything that is not a rotation.
    pub fn from_rows(rows: [[i8; 3]; 3]) -> Option<Self> {
        let o = Orientation(rows);
        if o.is_signed_permutation() && o.determinant() == 1 {
            Some(o)
        } else {
            None
        }
    }

    /// Snap a float rotation matrix to the nearest exact orientation.
    ///
    /// Returns `None` if the rounded matrix is not a proper rotation.
    pub fn round_from(m: [[f32; 3]; 3]) -> Option<Self> {
        let mut rows = [[0i8; 3]; 3];
        for (i, row) in m.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let r = v.round();
                if !(-1.0..=1.0).contains(&r) {
                    return None;
                }
                rows[i][j] = r as i8;
            }
        }
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> [[i8; 3]; 3] {
        self.0
    }

    /// Apply `dir` after this orientation.
    pub fn then(self, dir: RotateDir) -> Self {
        Self::quarter_turn(dir).compose(self)
    }

    /// Matrix product `self * rhs` (apply `rhs` first).
    pub fn compose(self, rhs: Orientation) -> Self {
        let mut out = [[0i8; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        Orientation(out)
    }

    pub fn transpose(self) -> Self {
        let m = self.0;
        Orientation([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn apply(&self, v: GridPos) -> GridPos {
        let v = v.to_array();
        let mut out = [0i32; 3];
        for (i, o) in out.iter_mut().enumerate() {
            *o = (0..3).map(|k| self.0[i][k] as i32 * v[k]).sum();
        }
        GridPos::from_array(out)
    }

    /// Exactly one ±1 in every row and every column.
    pub fn is_signed_permutation(&self) -> bool {
        let rows_ok = self
            .0
            .iter()
            .all(|row| row.iter().filter(|&&v| v != 0).count() == 1 && row.iter().all(|v| v.abs() <= 1));
        let cols_ok = (0..3).all(|j| (0..3).filter(|&i| self.0[i][j] != 0).count() == 1);
        rows_ok && cols_ok
    }

    pub fn determinant(&self) -> i32 {
        let m = self.0.map(|row| row.map(i32::from));
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn to_f32(&self) -> [[f32; 3]; 3] {
        self.0.map(|row| row.map(f32::from))
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::IDENTITY
    }
}

/// Rotation matrix for a turn that has progressed `angle_deg` degrees.
pub fn animated_matrix(dir: RotateDir, angle_deg: u32) -> [[f32; 3]; 3] {
    let signed = if dir.is_positive() {
        angle_deg as f32
    } else {
        -(angle_deg as f32)
    };
    let (s, c) = signed.to_radians().sin_cos();
    match dir.axis() {
        Axis::X => [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
        Axis::Y => [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
        Axis::Z => [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
    }
}

/// Float matrix product.
pub fn mul_f32(a: [[f32; 3]; 3], b: [[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0f32; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}
