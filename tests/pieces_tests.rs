//! Piece, rotation and collision tests

use element_tetris::core::{collides, drop_distance, try_rotate, Cell, Grid, Piece, Shape};
use element_tetris::types::{ElementKind, Offset, Position, TetrominoKind};

fn piece_at(kind: ElementKind, row: i8, col: i8) -> Piece {
    Piece::new(Shape::single(kind), Position::new(row, col))
}

#[test]
fn test_collision_bounds() {
    let grid = Grid::new();
    for row in -3..14 {
        assert!(collides(&piece_at(ElementKind::Fire, row, -1), &grid, Offset::ZERO));
        assert!(collides(&piece_at(ElementKind::Fire, row, 10), &grid, Offset::ZERO));
    }
    assert!(collides(&piece_at(ElementKind::Fire, 14, 0), &grid, Offset::ZERO));
    // Above the board is open.
    assert!(!collides(&piece_at(ElementKind::Fire, -5, 0), &grid, Offset::ZERO));
}

#[test]
fn test_collision_uses_offset() {
    let mut grid = Grid::new();
    grid.set(13, 4, Cell::new(ElementKind::Rock));
    let piece = piece_at(ElementKind::Water, 12, 3);

    assert!(!collides(&piece, &grid, Offset::ZERO));
    assert!(collides(&piece, &grid, Offset::new(1, 1)));
    assert!(!collides(&piece, &grid, Offset::new(1, 0)));
}

#[test]
fn test_drop_distance_from_spawn() {
    let grid = Grid::from_rows(&[".....R....", "RRRRRRRRRR"]).unwrap();
    assert_eq!(drop_distance(&Piece::single(ElementKind::Fire), &grid), 11);
    assert_eq!(drop_distance(&piece_at(ElementKind::Fire, 0, 0), &grid), 12);
}

#[test]
fn test_tetromino_spawn_is_centered() {
    let i = Piece::tetromino(TetrominoKind::I, ElementKind::Rock);
    assert_eq!(i.anchor, Position::new(0, 3));
    let o = Piece::tetromino(TetrominoKind::O, ElementKind::Rock);
    assert_eq!(o.anchor, Position::new(0, 4));
    let t = Piece::tetromino(TetrominoKind::T, ElementKind::Rock);
    assert_eq!(t.anchor, Position::new(0, 3));
    assert!(t.cells().all(|(_, kind)| kind == ElementKind::Rock));
}

#[test]
fn test_rotation_kicks_off_the_wall() {
    // Vertical I in column 8: the horizontal form only fits two columns to the left.
    let grid = Grid::new();
    let vertical = Piece::tetromino(TetrominoKind::I, ElementKind::Fire).rotated_cw();
    let at_wall = Piece {
        anchor: Position::new(2, 8),
        ..vertical
    };

    let (placed, kick) = try_rotate(&at_wall, |p, off| collides(p, &grid, off)).unwrap();
    assert_eq!(kick, Offset::new(0, -2));
    assert_eq!(placed.anchor, Position::new(2, 6));
    assert_eq!(placed.shape.width(), 4);
    assert!(!collides(&placed, &grid, Offset::ZERO));
}

#[test]
fn test_rotation_fails_when_every_kick_blocked() {
    let grid = Grid::from_rows(&["RRRR.RRRRR"; 14]).unwrap();
    let vertical = Piece::new(
        Shape::from_mask(&[&[1], &[1]], ElementKind::Water).unwrap(),
        Position::new(0, 4),
    );
    assert!(!collides(&vertical, &grid, Offset::ZERO));
    assert!(try_rotate(&vertical, |p, off| collides(p, &grid, off)).is_none());
}
