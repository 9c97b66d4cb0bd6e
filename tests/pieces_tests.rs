//! Pieces tests - spawning, translation limits and quarter turns

use tetris3d::core::piece::offsets;
use tetris3d::core::{Cube, LockedGrid, Piece};
use tetris3d::types::{GridBounds, GridPos, PieceKind, RotateDir, TranslateDir, QUARTER_TURN_DEG};

fn sorted(mut v: [GridPos; 4]) -> [GridPos; 4] {
    v.sort_by_key(|p| (p.x, p.y, p.z));
    v
}

/// Run a full quarter turn at 30° per step.
fn turn(piece: &mut Piece, dir: RotateDir, grid: &LockedGrid) -> bool {
    let b = *grid.bounds();
    while piece.turn_angle() < QUARTER_TURN_DEG {
        if !piece.rotate(dir, 30, grid, &b) {
            return false;
        }
    }
    piece.update_rotation_location()
}

// ============== Template Tests ==============

#[test]
fn test_every_template_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        let cells = offsets(kind);
        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(cells[i], cells[j], "{:?} repeats a cell", kind);
            }
        }
    }
}

#[test]
fn test_templates_touch_the_anchor_row() {
    for kind in PieceKind::ALL {
        let cells = offsets(kind);
        assert!(cells.iter().any(|c| c.y == 0), "{:?}", kind);
        assert!(cells.iter().all(|c| c.y == 0 || c.y == -1), "{:?}", kind);
    }
}

#[test]
fn test_only_variants_use_depth() {
    for kind in PieceKind::CLASSIC {
        assert!(offsets(kind).iter().all(|c| c.z == 0), "{:?}", kind);
    }
    for kind in [PieceKind::TVar, PieceKind::SVar, PieceKind::ZVar] {
        assert!(offsets(kind).iter().any(|c| c.z != 0), "{:?}", kind);
    }
}

// ============== Spawn Tests ==============

#[test]
fn test_i_spawns_across_small_grid() {
    let piece = Piece::spawn(PieceKind::I, &GridBounds::SMALL);
    assert_eq!(
        piece.positions(),
        [
            GridPos::new(-2, 5, 0),
            GridPos::new(-1, 5, 0),
            GridPos::new(0, 5, 0),
            GridPos::new(1, 5, 0),
        ]
    );
    assert_eq!(piece.lowest_y(), 5);
    assert!(!piece.is_rotating());
}

#[test]
fn test_t_spawns_on_classic_grid() {
    let piece = Piece::spawn(PieceKind::T, &GridBounds::CLASSIC);
    assert_eq!(
        sorted(piece.positions()),
        [
            GridPos::new(-1, 6, 0),
            GridPos::new(0, 5, 0),
            GridPos::new(0, 6, 0),
            GridPos::new(1, 6, 0),
        ]
    );
}

// ============== Translation Tests ==============

#[test]
fn test_translate_stops_at_left_wall() {
    let b = GridBounds::SMALL;
    let grid = LockedGrid::new(b);
    let mut piece = Piece::spawn(PieceKind::T, &b);
    assert!(piece.translate(TranslateDir::Left, &grid, &b));
    assert!(!piece.translate(TranslateDir::Left, &grid, &b));
    assert_eq!(piece.positions().iter().map(|p| p.x).min(), Some(b.x_min));
}

#[test]
fn test_translate_front_and_back() {
    let b = GridBounds::SMALL;
    let grid = LockedGrid::new(b);
    let mut piece = Piece::spawn(PieceKind::O, &b);
    // z = 0, z_max = 1
    assert!(piece.translate(TranslateDir::Front, &grid, &b));
    assert!(!piece.translate(TranslateDir::Front, &grid, &b));
    assert!(piece.translate(TranslateDir::Back, &grid, &b));
    assert!(piece.translate(TranslateDir::Back, &grid, &b));
    assert!(piece.translate(TranslateDir::Back, &grid, &b));
    assert!(!piece.translate(TranslateDir::Back, &grid, &b));
    assert!(piece.positions().iter().all(|p| p.z == b.z_min));
}

#[test]
fn test_translate_blocked_by_locked_cube() {
    let b = GridBounds::SMALL;
    let mut grid = LockedGrid::new(b);
    grid.push(Cube::locked(GridPos::new(0, 3, 0)));
    let mut piece = Piece::spawn(PieceKind::T, &b);
    assert!(!piece.can_translate(TranslateDir::Down, &grid, &b));
    assert!(!piece.translate(TranslateDir::Down, &grid, &b));
    assert!(!piece.translate(TranslateDir::Right, &grid, &b));
    assert!(piece.translate(TranslateDir::Left, &grid, &b));
    assert!(piece.can_translate(TranslateDir::Down, &grid, &b));
}

// ============== Rotation Tests ==============

#[test]
fn test_i_turn_about_y() {
    let b = GridBounds::SMALL;
    let grid = LockedGrid::new(b);
    let mut piece = Piece::spawn(PieceKind::I, &b);

    // +90° about Y would push the bar past z_max.
    assert!(!piece.can_rotate(RotateDir::YPos, &grid, &b));
    assert!(!turn(&mut piece, RotateDir::YPos, &grid));
    assert!(!piece.is_rotating());

    assert!(turn(&mut piece, RotateDir::YNeg, &grid));
    assert_eq!(
        piece.positions(),
        [
            GridPos::new(0, 5, -2),
            GridPos::new(0, 5, -1),
            GridPos::new(0, 5, 0),
            GridPos::new(0, 5, 1),
        ]
    );
}

#[test]
fn test_i_stands_up_after_falling() {
    let b = GridBounds::SMALL;
    let grid = LockedGrid::new(b);
    let mut piece = Piece::spawn(PieceKind::I, &b);
    assert!(!piece.can_rotate(RotateDir::ZPos, &grid, &b));

    piece.translate(TranslateDir::Down, &grid, &b);
    piece.translate(TranslateDir::Down, &grid, &b);
    assert!(turn(&mut piece, RotateDir::ZPos, &grid));
    let ys: Vec<i32> = piece.positions().iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![1, 2, 3, 4]);
    assert!(piece.positions().iter().all(|p| p.x == 0 && p.z == 0));
}

#[test]
fn test_turn_in_progress_blocks_other_turns() {
    let b = GridBounds::CLASSIC;
    let grid = LockedGrid::new(b);
    let mut piece = Piece::spawn(PieceKind::T, &b);
    piece.translate(TranslateDir::Down, &grid, &b);
    piece.translate(TranslateDir::Down, &grid, &b);

    assert!(piece.rotate(RotateDir::ZPos, 30, &grid, &b));
    assert_eq!(piece.turn_angle(), 30);
    assert!(!piece.rotate(RotateDir::XPos, 30, &grid, &b));
    assert!(!piece.update_rotation_location());
    assert!(piece.rotate(RotateDir::ZPos, 30, &grid, &b));
    assert!(piece.rotate(RotateDir::ZPos, 30, &grid, &b));
    assert!(piece.update_rotation_location());
    assert!(!piece.is_rotating());
}

#[test]
fn test_turn_and_inverse_round_trip() {
    let b = GridBounds::CLASSIC;
    let grid = LockedGrid::new(b);
    for kind in PieceKind::ALL {
        let mut piece = Piece::spawn(kind, &b);
        for _ in 0..3 {
            piece.translate(TranslateDir::Down, &grid, &b);
        }
        let before = piece.positions();
        for dir in RotateDir::ALL {
            if !turn(&mut piece, dir, &grid) {
                continue;
            }
            assert!(turn(&mut piece, dir.inverse(), &grid), "{:?} {:?}", kind, dir);
            assert_eq!(piece.positions(), before, "{:?} {:?}", kind, dir);
        }
    }
}

#[test]
fn test_four_quarter_turns_return_home() {
    let b = GridBounds::CLASSIC;
    let grid = LockedGrid::new(b);
    let mut piece = Piece::spawn(PieceKind::L, &b);
    for _ in 0..4 {
        piece.translate(TranslateDir::Down, &grid, &b);
    }
    let before = piece.positions();
    for _ in 0..4 {
        assert!(turn(&mut piece, RotateDir::XPos, &grid));
    }
    assert_eq!(piece.positions(), before);
}
