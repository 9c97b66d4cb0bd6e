//! Locked grid module - settled cubes bucketed by row
//!
//! Row `i` holds every locked cube with `y == y_min + i`. `height` is the
//! highest occupied row, or `y_min - 1` when the grid is empty.

use crate::collision::{self, Occupancy};
use crate::cube::Cube;
use crate::piece::Piece;
use crate::types::{Direction, GridBounds, GridPos};

#[derive(Debug, Clone, PartialEq)]
pub struct LockedGrid {
    bounds: GridBounds,
    rows: Vec<Vec<Cube>>,
    height: i32,
}

impl LockedGrid {
    pub fn new(bounds: GridBounds) -> Self {
        let mut rows = Vec::with_capacity(bounds.row_count());
        rows.resize_with(bounds.row_count(), || Vec::with_capacity(bounds.row_capacity()));
        Self {
            bounds,
            rows,
            height: bounds.y_min - 1,
        }
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Highest occupied row (`y_min - 1` when empty).
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.is_empty())
    }

    /// Total locked cubes.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    /// Locked cubes on row `y`.
    pub fn row(&self, y: i32) -> &[Cube] {
        match self.row_index(y) {
            Some(i) => &self.rows[i],
            None => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cube> {
        self.rows.iter().flatten()
    }

    /// Insert a cube into its row bucket.
    ///
    /// # Panics
    ///
    /// If the cube lies outside the grid. Pieces are only ever locked at legal
    /// positions, so this is an engine bug rather than a game condition.
    pub fn push(&mut self, cube: Cube) {
        let pos = cube.position();
        assert!(
            self.bounds.contains(pos),
            "locked cube {:?} outside grid {:?}",
            pos,
            self.bounds
        );
        let i = (pos.y - self.bounds.y_min) as usize;
        self.rows[i].push(cube);
        self.height = self.height.max(pos.y);
    }

    /// Whether moving `cube` in `direction` lands on a locked cube.
    pub fn is_collision(&self, direction: Direction, cube: &Cube) -> bool {
        collision::would_collide(self, direction, cube)
    }

    /// Remove every full row, shifting the rows above down by one.
    ///
    /// After a removal the same row index is examined again, since it now holds
    /// what used to be the row above. Returns the number of rows removed.
    pub fn clear_rows(&mut self) -> u32 {
        let capacity = self.bounds.row_capacity();
        let mut cleared = 0;
        let mut i = 0usize;
        while self.bounds.y_min + i as i32 <= self.height {
            if self.rows[i].len() == capacity {
                cleared += 1;
                self.rows.remove(i);
                for row in &mut self.rows[i..] {
                    for cube in row.iter_mut() {
                        cube.shift_down();
                    }
                }
                self.rows.push(Vec::with_capacity(capacity));
                self.height -= 1;
            } else {
                i += 1;
            }
        }
        cleared
    }

    /// Whether a freshly spawned piece overlaps the top two rows.
    ///
    /// The row below the top is only consulted once the stack has reached it,
    /// and the top row only once the stack has reached the top.
    pub fn game_over(&self, piece: &Piece) -> bool {
        let top = self.bounds.y_max;
        let mut rows = [None, None];
        if self.height >= top - 1 {
            rows[0] = Some(top - 1);
        }
        if self.height >= top {
            rows[1] = Some(top);
        }
        rows.iter().flatten().any(|&y| {
            let row = self.row(y);
            piece
                .positions()
                .iter()
                .any(|p| row.iter().any(|c| c.position() == *p))
        })
    }

    /// Drop every locked cube.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
        self.height = self.bounds.y_min - 1;
    }

    fn row_index(&self, y: i32) -> Option<usize> {
        if y < self.bounds.y_min || y > self.bounds.y_max {
            return None;
        }
        Some((y - self.bounds.y_min) as usize)
    }
}

impl Occupancy for LockedGrid {
    fn is_occupied(&self, pos: GridPos) -> bool {
        if !self.bounds.contains(pos) {
            return false;
        }
        self.row(pos.y).iter().any(|c| c.position() == pos)
    }
}
