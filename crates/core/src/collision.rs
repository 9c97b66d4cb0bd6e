//! Collision module - pure predicates shared by pieces and the locked grid
//!
//! Translations test the neighbouring cell. Rotations test only the resting
//! cell after the full quarter turn; the cells swept through mid-turn are not
//! checked.

use crate::cube::Cube;
use crate::types::{Direction, GridBounds, GridPos};

/// Anything that can report whether a grid cell is taken.
pub trait Occupancy {
    fn is_occupied(&self, pos: GridPos) -> bool;
}

/// Cell `cube` would occupy after moving in `direction`.
pub fn target_position(direction: Direction, cube: &Cube) -> GridPos {
    match direction {
        Direction::Translate(dir) => cube.translated_position(dir),
        Direction::Rotate(dir) => cube.rotated_position(dir),
    }
}

/// True when the target cell of `cube` is already occupied.
pub fn would_collide<O: Occupancy + ?Sized>(occupancy: &O, direction: Direction, cube: &Cube) -> bool {
    occupancy.is_occupied(target_position(direction, cube))
}

/// True when any coordinate lies outside the grid.
pub fn is_out_of_bounds(bounds: &GridBounds, pos: GridPos) -> bool {
    !bounds.contains(pos)
}
