//! Locked grid tests - row buckets, clearing and top-out detection

use tetris3d::core::{Cube, LockedGrid, Occupancy, Piece};
use tetris3d::types::{Direction, GridBounds, GridPos, PieceKind, TranslateDir};

fn fill_row_except(grid: &mut LockedGrid, y: i32, skip: &[GridPos]) {
    let b = *grid.bounds();
    for x in b.x_min..=b.x_max {
        for z in b.z_min..=b.z_max {
            let pos = GridPos::new(x, y, z);
            if !skip.contains(&pos) {
                grid.push(Cube::locked(pos));
            }
        }
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = LockedGrid::new(GridBounds::SMALL);
    assert!(grid.is_empty());
    assert_eq!(grid.len(), 0);
    assert_eq!(grid.height(), GridBounds::SMALL.y_min - 1);
    for y in GridBounds::SMALL.y_min..=GridBounds::SMALL.y_max {
        assert!(grid.row(y).is_empty(), "row {} should be empty", y);
    }
}

#[test]
fn test_row_outside_grid_is_empty() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    fill_row_except(&mut grid, -5, &[]);
    assert!(grid.row(-6).is_empty());
    assert!(grid.row(6).is_empty());
}

#[test]
fn test_push_tracks_height() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    grid.push(Cube::locked(GridPos::new(0, -5, 0)));
    assert_eq!(grid.height(), -5);
    grid.push(Cube::locked(GridPos::new(1, 2, -2)));
    assert_eq!(grid.height(), 2);
    grid.push(Cube::locked(GridPos::new(-1, 0, 0)));
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.row(2).len(), 1);
    assert!(grid.is_occupied(GridPos::new(1, 2, -2)));
    assert!(!grid.is_occupied(GridPos::new(1, 1, -2)));
}

#[test]
#[should_panic]
fn test_push_outside_grid_panics() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    grid.push(Cube::locked(GridPos::new(2, 0, 0)));
}

#[test]
fn test_is_collision_looks_at_target_cell() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    grid.push(Cube::locked(GridPos::new(0, -5, 0)));
    let falling = Cube::locked(GridPos::new(0, -4, 0));
    assert!(grid.is_collision(Direction::Translate(TranslateDir::Down), &falling));
    assert!(!grid.is_collision(Direction::Translate(TranslateDir::Left), &falling));
}

#[test]
fn test_clear_partial_row_does_nothing() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    fill_row_except(&mut grid, -5, &[GridPos::new(0, -5, 0)]);
    assert_eq!(grid.clear_rows(), 0);
    assert_eq!(grid.len(), 15);
}

#[test]
fn test_clear_single_row_shifts_above() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    fill_row_except(&mut grid, -5, &[]);
    grid.push(Cube::locked(GridPos::new(1, -4, 1)));
    grid.push(Cube::locked(GridPos::new(-2, 0, -2)));

    assert_eq!(grid.clear_rows(), 1);
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.height(), -1);
    assert_eq!(grid.row(-5)[0].position(), GridPos::new(1, -5, 1));
    assert!(grid.is_occupied(GridPos::new(-2, -1, -2)));
    assert!(!grid.is_occupied(GridPos::new(-2, 0, -2)));
}

#[test]
fn test_clear_adjacent_rows() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    fill_row_except(&mut grid, -5, &[]);
    fill_row_except(&mut grid, -4, &[]);
    fill_row_except(&mut grid, -3, &[GridPos::new(0, -3, 0)]);
    fill_row_except(&mut grid, -2, &[]);

    assert_eq!(grid.clear_rows(), 3);
    assert_eq!(grid.len(), 15);
    assert_eq!(grid.row(-5).len(), 15);
    assert_eq!(grid.height(), -5);
}

#[test]
fn test_reset_clears_everything() {
    let mut grid = LockedGrid::new(GridBounds::SMALL);
    fill_row_except(&mut grid, 0, &[]);
    grid.reset();
    assert!(grid.is_empty());
    assert_eq!(grid.height(), -6);
}

#[test]
fn test_game_over_only_near_the_top() {
    let b = GridBounds::SMALL;
    let mut grid = LockedGrid::new(b);
    let piece = Piece::spawn(PieceKind::T, &b);

    // Overlap alone does not count while the stack is low.
    assert!(!grid.game_over(&piece));

    fill_row_except(&mut grid, 3, &[]);
    assert!(!grid.game_over(&piece));

    // T occupies (0,4,0) below the top row.
    grid.push(Cube::locked(GridPos::new(0, 4, 0)));
    assert!(grid.game_over(&piece));
}

#[test]
fn test_game_over_top_row() {
    let b = GridBounds::SMALL;
    let mut grid = LockedGrid::new(b);
    grid.push(Cube::locked(GridPos::new(-2, 5, 0)));
    assert!(grid.game_over(&Piece::spawn(PieceKind::I, &b)));
    assert!(!grid.game_over(&Piece::spawn(PieceKind::O, &b)));
}
