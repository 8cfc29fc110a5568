//! Piece module - element shapes, matrix rotation and column kicks
//!
//! A piece is a small rectangular matrix of element kinds plus an anchor on the grid.
//! The stock rule set only spawns 1x1 pieces, but everything here works for any
//! rectangle up to 4x4, including the tetromino outlines in [`tetromino_mask`].

use crate::types::{ElementKind, Offset, Position, TetrominoKind, GRID_COLS, SPAWN_COL};

/// Largest supported shape side
pub const MAX_SHAPE_SIDE: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// Rotation kicks, tried strictly in this order (column-only, no row kicks)
pub const ROTATION_KICKS: [Offset; 5] = [
    Offset::new(0, 0),
    Offset::new(0, -1),
    Offset::new(0, 1),
    Offset::new(0, -2),
    Offset::new(0, 2),
];

/// Rectangular matrix of element kinds, `None` marking holes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    height: u8,
    width: u8,
    /// Row-major, only the first `height * width` entries are meaningful
    cells: [ElementKind; MAX_SHAPE_CELLS],
}

impl Shape {
    /// A 1x1 shape holding one element
    pub fn single(kind: ElementKind) -> Self {
        let mut cells = [ElementKind::None; MAX_SHAPE_CELLS];
        cells[0] = kind;
        Self {
            height: 1,
            width: 1,
            cells,
        }
    }

    /// Build from explicit rows; None if empty, ragged or larger than 4x4
    pub fn from_rows(rows: &[&[ElementKind]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIDE || width > MAX_SHAPE_SIDE {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [ElementKind::None; MAX_SHAPE_CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * width..(r + 1) * width].copy_from_slice(row);
        }
        Some(Self {
            height: height as u8,
            width: width as u8,
            cells,
        })
    }

    /// Fill a 0/1 mask with a single element
    pub fn from_mask(mask: &[&[u8]], kind: ElementKind) -> Option<Self> {
        let height = mask.len();
        let width = mask.first()?.len();
        if height > MAX_SHAPE_SIDE || width == 0 || width > MAX_SHAPE_SIDE {
            return None;
        }

        let mut cells = [ElementKind::None; MAX_SHAPE_CELLS];
        for (r, row) in mask.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (c, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    cells[r * width + c] = kind;
                }
            }
        }
        Some(Self {
            height: height as u8,
            width: width as u8,
            cells,
        })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Kind at (r, c) inside the matrix; `None` outside it
    pub fn get(&self, r: u8, c: u8) -> ElementKind {
        if r >= self.height || c >= self.width {
            return ElementKind::None;
        }
        self.cells[r as usize * self.width as usize + c as usize]
    }

    /// 90° clockwise: `new[c][height - 1 - r] = old[r][c]`
    pub fn rotated_cw(&self) -> Self {
        let (h, w) = (self.height as usize, self.width as usize);
        let mut cells = [ElementKind::None; MAX_SHAPE_CELLS];
        for r in 0..h {
            for c in 0..w {
                // New matrix is w rows by h columns.
                cells[c * h + (h - 1 - r)] = self.cells[r * w + c];
            }
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }

    /// Non-empty cells as (r, c, kind), row-major
    pub fn filled(&self) -> impl Iterator<Item = (u8, u8, ElementKind)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width).filter_map(move |c| {
                let kind = self.get(r, c);
                kind.is_occupied().then_some((r, c, kind))
            })
        })
    }

    pub fn cell_count(&self) -> usize {
        self.filled().count()
    }
}

/// Tetromino outlines (1 = filled), spawn orientation
pub fn tetromino_mask(kind: TetrominoKind) -> &'static [&'static [u8]] {
    match kind {
        TetrominoKind::I => &[&[1, 1, 1, 1]],
        TetrominoKind::J => &[&[1, 0, 0], &[1, 1, 1]],
        TetrominoKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        TetrominoKind::O => &[&[1, 1], &[1, 1]],
        TetrominoKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        TetrominoKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        TetrominoKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
    }
}

/// Falling piece: a shape anchored at its top-left matrix corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub anchor: Position,
}

impl Piece {
    pub fn new(shape: Shape, anchor: Position) -> Self {
        Self { shape, anchor }
    }

    /// A 1x1 piece at the spawn anchor (row 0, column 5)
    pub fn single(kind: ElementKind) -> Self {
        Self::new(Shape::single(kind), Position::new(0, SPAWN_COL))
    }

    /// A tetromino filled with one element, centred on the spawn row
    pub fn tetromino(kind: TetrominoKind, element: ElementKind) -> Self {
        let shape = Shape::from_mask(tetromino_mask(kind), element);
        debug_assert!(shape.is_some(), "malformed {kind:?} mask");
        let shape = shape.unwrap_or_else(|| Shape::single(element));
        let col = (GRID_COLS - shape.width()) / 2;
        Self::new(shape, Position::new(0, col as i8))
    }

    /// The element of the first filled cell
    pub fn element(&self) -> ElementKind {
        self.shape
            .filled()
            .next()
            .map(|(_, _, kind)| kind)
            .unwrap_or(ElementKind::None)
    }

    /// Absolute grid positions of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (Position, ElementKind)> + '_ {
        let anchor = self.anchor;
        self.shape.filled().map(move |(r, c, kind)| {
            (
                Position::new(anchor.row + r as i8, anchor.col + c as i8),
                kind,
            )
        })
    }

    pub fn translated(&self, offset: Offset) -> Self {
        Self {
            anchor: self.anchor.shifted(offset),
            ..*self
        }
    }

    /// Moved down by `rows`, which may exceed the `i8` offset range when the piece
    /// starts far above the board. Saturates at `i8::MAX`.
    pub fn lowered(&self, rows: u8) -> Self {
        let row = i16::from(self.anchor.row) + i16::from(rows);
        Self {
            anchor: Position::new(i8::try_from(row).unwrap_or(i8::MAX), self.anchor.col),
            ..*self
        }
    }

    /// Same anchor, shape rotated 90° clockwise
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

/// Rotate clockwise, trying each kick in [`ROTATION_KICKS`] order.
///
/// `collides(piece, offset)` reports whether `piece` shifted by `offset` is blocked.
/// Returns the placed piece and the kick used, or None if every kick is blocked.
pub fn try_rotate(
    piece: &Piece,
    collides: impl Fn(&Piece, Offset) -> bool,
) -> Option<(Piece, Offset)> {
    let rotated = piece.rotated_cw();
    ROTATION_KICKS
        .iter()
        .find(|&&kick| !collides(&rotated, kick))
        .map(|&kick| (rotated.translated(kick), kick))
}
