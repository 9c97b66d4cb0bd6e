//! Property tests for the engine invariants that must hold on any grid.

use proptest::prelude::*;
use tetris3d::core::{Cube, LockedGrid, Piece, PieceSpawner};
use tetris3d::types::{GridBounds, GridPos, PieceKind, PieceSet, RotateDir, TranslateDir, QUARTER_TURN_DEG};

fn bounds_strategy() -> impl Strategy<Value = GridBounds> {
    (-6i32..6, 4i32..9, -10i32..0, 4i32..16, -6i32..6, 4i32..9).prop_map(|(x0, w, y0, h, z0, d)| {
        GridBounds::new(x0, x0 + w - 1, y0, y0 + h - 1, z0, z0 + d - 1).unwrap()
    })
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..PieceKind::ALL.len()).prop_map(|i| PieceKind::ALL[i])
}

fn dir_strategy() -> impl Strategy<Value = RotateDir> {
    (0usize..RotateDir::ALL.len()).prop_map(|i| RotateDir::ALL[i])
}

fn full_turn(piece: &mut Piece, dir: RotateDir, grid: &LockedGrid) -> bool {
    let b = *grid.bounds();
    while piece.turn_angle() < QUARTER_TURN_DEG {
        if !piece.rotate(dir, 30, grid, &b) {
            return false;
        }
    }
    piece.update_rotation_location()
}

proptest! {
    #[test]
    fn spawn_fits_top_two_rows(b in bounds_strategy(), kind in kind_strategy()) {
        let piece = Piece::spawn(kind, &b);
        let cells = piece.positions();
        for p in cells {
            prop_assert!(b.contains(p), "{:?} outside {:?}", p, b);
            prop_assert!(p.y == b.y_max || p.y == b.y_max - 1);
        }
        prop_assert!(cells.iter().any(|p| p.y == b.y_max));
    }

    #[test]
    fn left_moves_stop_at_wall(b in bounds_strategy(), kind in kind_strategy()) {
        let grid = LockedGrid::new(b);
        let mut piece = Piece::spawn(kind, &b);
        let start_min = piece.positions().iter().map(|p| p.x).min().unwrap();
        let mut moves = 0;
        while piece.translate(TranslateDir::Left, &grid, &b) {
            moves += 1;
            prop_assert!(moves <= b.width());
        }
        prop_assert_eq!(moves, start_min - b.x_min);
        prop_assert_eq!(piece.positions().iter().map(|p| p.x).min(), Some(b.x_min));
    }

    #[test]
    fn turn_then_inverse_is_identity(
        b in bounds_strategy(),
        kind in kind_strategy(),
        dir in dir_strategy(),
        drops in 0usize..6,
    ) {
        let grid = LockedGrid::new(b);
        let mut piece = Piece::spawn(kind, &b);
        for _ in 0..drops {
            piece.translate(TranslateDir::Down, &grid, &b);
        }
        let before = piece.positions();
        if full_turn(&mut piece, dir, &grid) {
            for p in piece.positions() {
                prop_assert!(b.contains(p));
            }
            prop_assert!(full_turn(&mut piece, dir.inverse(), &grid));
            prop_assert_eq!(piece.positions(), before);
        } else {
            prop_assert_eq!(piece.positions(), before);
            prop_assert!(!piece.is_rotating());
        }
    }

    #[test]
    fn spawner_never_repeats(seed in any::<u32>(), classic in any::<bool>()) {
        let set = if classic { PieceSet::Classic } else { PieceSet::Extended };
        let mut spawner = PieceSpawner::new(seed, set);
        let mut prev = spawner.draw();
        for _ in 0..200 {
            let next = spawner.draw();
            prop_assert_ne!(next, prev);
            prop_assert!(set.kinds().contains(&next));
            prev = next;
        }
    }

    #[test]
    fn full_row_is_cleared(b in bounds_strategy(), row in 0i32..16, extra in 0i32..4) {
        let y = b.y_min + row % b.height();
        let mut grid = LockedGrid::new(b);
        for x in b.x_min..=b.x_max {
            for z in b.z_min..=b.z_max {
                grid.push(Cube::locked(GridPos::new(x, y, z)));
            }
        }
        // A partial column above the full row.
        let above: Vec<GridPos> = (1..=extra)
            .map(|dy| GridPos::new(b.x_min, y + dy, b.z_min))
            .filter(|p| b.contains(*p))
            .collect();
        for p in &above {
            grid.push(Cube::locked(*p));
        }

        prop_assert_eq!(grid.clear_rows(), 1);
        prop_assert_eq!(grid.len(), above.len());
        for p in &above {
            prop_assert!(grid.row(p.y - 1).iter().any(|c| c.position() == *p - GridPos::new(0, 1, 0)));
        }
    }
}
