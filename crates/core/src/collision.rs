//! Collision detection between a piece and the grid.
//!
//! The top edge is open: cells above row 0 only fail the column check, never the
//! grid check, so pieces can spawn and rotate partly above the visible board.
//! Locking above the board is handled (and is fatal) in the session.
//!
//! Offsets come straight from commands, so the arithmetic is done in `i16`; a target
//! whose anchor does not fit back into an `i8` position counts as a collision.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{Offset, GRID_COLS, GRID_ROWS};

/// True if `piece` shifted by `offset` leaves the board sideways, passes the floor,
/// or overlaps an occupied grid cell.
pub fn collides(piece: &Piece, grid: &Grid, offset: Offset) -> bool {
    blocked(piece, grid, i16::from(offset.row), i16::from(offset.col))
}

/// Largest number of rows the piece can fall before colliding
pub fn drop_distance(piece: &Piece, grid: &Grid) -> u8 {
    let mut distance: i16 = 0;
    while !blocked(piece, grid, distance + 1, 0) {
        distance += 1;
    }
    u8::try_from(distance).unwrap_or(u8::MAX)
}

fn blocked(piece: &Piece, grid: &Grid, rows: i16, cols: i16) -> bool {
    let anchor_row = i16::from(piece.anchor.row) + rows;
    let anchor_col = i16::from(piece.anchor.col) + cols;
    if i8::try_from(anchor_row).is_err() || i8::try_from(anchor_col).is_err() {
        return true;
    }

    piece.shape.filled().any(|(r, c, _)| {
        let row = anchor_row + i16::from(r);
        let col = anchor_col + i16::from(c);
        if col < 0 || col >= i16::from(GRID_COLS) || row >= i16::from(GRID_ROWS) {
            return true;
        }
        // In range here: 0 <= row < 14 and 0 <= col < 10.
        row >= 0 && grid.is_occupied(row as i8, col as i8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::types::{ElementKind, Position};

    fn at(row: i8, col: i8) -> Piece {
        let mut piece = Piece::single(ElementKind::Fire);
        piece.anchor = Position::new(row, col);
        piece
    }

    #[test]
    fn test_walls_and_floor() {
        let grid = Grid::new();
        assert!(!collides(&at(0, 0), &grid, Offset::ZERO));
        assert!(collides(&at(0, 0), &grid, Offset::new(0, -1)));
        assert!(collides(&at(0, 9), &grid, Offset::new(0, 1)));
        assert!(collides(&at(13, 4), &grid, Offset::DOWN));
        assert!(!collides(&at(12, 4), &grid, Offset::DOWN));
    }

    #[test]
    fn test_negative_row_is_not_a_collision() {
        let mut grid = Grid::new();
        for col in 0..10 {
            grid.set(0, col, Cell::new(ElementKind::Rock));
        }
        assert!(!collides(&at(-3, 4), &grid, Offset::ZERO));
        assert!(collides(&at(-3, -1), &grid, Offset::ZERO));
    }

    #[test]
    fn test_occupied_cell_collides() {
        let mut grid = Grid::new();
        grid.set(6, 4, Cell::new(ElementKind::Water));
        assert!(collides(&at(5, 4), &grid, Offset::DOWN));
        assert_eq!(drop_distance(&at(0, 4), &grid), 5);
        assert_eq!(drop_distance(&at(0, 3), &grid), 13);
    }

    #[test]
    fn test_extreme_offsets_never_overflow() {
        let grid = Grid::new();
        assert!(!collides(&at(0, 4), &grid, Offset::new(i8::MIN, 0)));
        assert!(collides(&at(0, 4), &grid, Offset::new(i8::MAX, 0)));
        assert!(collides(&at(13, 4), &grid, Offset::new(i8::MAX, 0)));
        assert!(collides(&at(-120, 4), &grid, Offset::new(-120, 0)));
        assert!(collides(&at(0, 9), &grid, Offset::new(0, i8::MAX)));
        assert!(collides(&at(0, 0), &grid, Offset::new(0, i8::MIN)));

        assert_eq!(drop_distance(&at(-120, 4), &grid), 133);
        assert_eq!(drop_distance(&at(i8::MIN, 4), &grid), 141);
    }
}
