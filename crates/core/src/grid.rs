//! Grid module - manages the element board
//!
//! The grid is a 14x10 array where each cell is either empty or holds one element.
//! Uses a flat array for better cache locality and cheap whole-grid copies.
//! Coordinates: (row, col) where row ranges 0..13 (top to bottom), col ranges 0..9
//! (left to right). Row 0 is the spawn edge, row 13 is the floor.

use std::fmt;
use std::str::FromStr;

use crate::types::{ElementKind, GRID_COLS, GRID_ROWS};

const COLS: usize = GRID_COLS as usize;
const ROWS: usize = GRID_ROWS as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = COLS * ROWS;

/// A single grid cell.
///
/// `occupied` always agrees with `kind != None`; the only way to build a cell is
/// through [`Cell::new`] or [`Cell::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    kind: ElementKind,
    occupied: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: ElementKind::None,
        occupied: false,
    };

    pub const fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            occupied: !matches!(kind, ElementKind::None),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    fn is_consistent(&self) -> bool {
        self.occupied == self.kind.is_occupied()
    }
}

/// One full grid row
pub type Row = [Cell; COLS];

/// The game grid - 14 rows x 10 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; GRID_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    pub fn cols(&self) -> u8 {
        GRID_COLS
    }

    /// Check if position lies on the grid
    pub fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && row < GRID_ROWS as i8 && col >= 0 && col < GRID_COLS as i8
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Element kind at (row, col); None if out of bounds
    pub fn kind(&self, row: i8, col: i8) -> Option<ElementKind> {
        self.get(row, col).map(|cell| cell.kind)
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(cell) if !cell.occupied)
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(cell) if cell.occupied)
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        debug_assert!(cell.is_consistent(), "inconsistent cell {cell:?}");
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty the cell at (row, col); returns false if out of bounds
    pub fn clear(&mut self, row: i8, col: i8) -> bool {
        self.set(row, col, Cell::EMPTY)
    }

    /// Copy out a whole row
    pub fn clone_row(&self, row: i8) -> Option<Row> {
        if row < 0 || row >= GRID_ROWS as i8 {
            return None;
        }
        let start = row as usize * COLS;
        let mut out = [Cell::EMPTY; COLS];
        out.copy_from_slice(&self.cells[start..start + COLS]);
        Some(out)
    }

    fn row_slice(&self, row: usize) -> &[Cell] {
        let start = row * COLS;
        &self.cells[start..start + COLS]
    }

    /// A row clears when every column is occupied by the same element kind
    pub fn is_row_clearable(&self, row: i8) -> bool {
        if row < 0 || row >= GRID_ROWS as i8 {
            return false;
        }
        let cells = self.row_slice(row as usize);
        let first = cells[0];
        first.occupied && cells.iter().all(|cell| cell.kind == first.kind)
    }

    /// Check if every column of a row is occupied, regardless of kind
    pub fn is_row_full(&self, row: i8) -> bool {
        if row < 0 || row >= GRID_ROWS as i8 {
            return false;
        }
        self.row_slice(row as usize).iter().all(|cell| cell.occupied)
    }

    /// Empty every cell of a row in place (no shifting; gravity handles that)
    pub fn clear_row(&mut self, row: i8) -> bool {
        if row < 0 || row >= GRID_ROWS as i8 {
            return false;
        }
        let start = row as usize * COLS;
        self.cells[start..start + COLS].fill(Cell::EMPTY);
        true
    }

    /// Number of occupied cells on the grid
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.occupied).count()
    }

    /// Check the `occupied`/`kind` invariant for every cell
    pub fn is_consistent(&self) -> bool {
        self.cells.iter().all(Cell::is_consistent)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export element kinds as a 2D array (row-major)
    pub fn write_kinds(&self, out: &mut [[ElementKind; COLS]; ROWS]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, kind) in out_row.iter_mut().enumerate() {
                *kind = self.cells[row * COLS + col].kind;
            }
        }
    }

    /// Build a grid from text rows, bottom-aligned.
    ///
    /// Each row must be exactly 10 characters of `F`, `W`, `R`, `D`, `.` or space.
    /// Fewer than 14 rows fill the bottom of the grid; rows above stay empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardParseError> {
        if rows.len() > ROWS {
            return Err(BoardParseError::TooManyRows { rows: rows.len() });
        }

        let mut grid = Self::new();
        let top = ROWS - rows.len();
        for (i, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let width = text.chars().count();
            if width != COLS {
                return Err(BoardParseError::RowWidth { row: i, width });
            }
            for (col, ch) in text.chars().enumerate() {
                let kind = ElementKind::from_char(ch)
                    .ok_or(BoardParseError::UnknownElement { row: i, col, ch })?;
                grid.cells[(top + i) * COLS + col] = Cell::new(kind);
            }
        }
        Ok(grid)
    }

    /// Text rows, top to bottom, in the same notation [`Grid::from_rows`] accepts
    pub fn to_rows(&self) -> Vec<String> {
        (0..ROWS)
            .map(|row| {
                self.row_slice(row)
                    .iter()
                    .map(|cell| cell.kind.as_char())
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses rows separated by `/`, e.g. `"RRRR.RRRRR/FWFWFWFWFW"`
impl FromStr for Grid {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        Self::from_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Errors from parsing a text board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardParseError {
    TooManyRows { rows: usize },
    RowWidth { row: usize, width: usize },
    UnknownElement { row: usize, col: usize, ch: char },
}

impl BoardParseError {
    pub fn code(self) -> &'static str {
        match self {
            BoardParseError::TooManyRows { .. } => "too_many_rows",
            BoardParseError::RowWidth { .. } => "row_width",
            BoardParseError::UnknownElement { .. } => "unknown_element",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BoardParseError::TooManyRows { .. } => "board has more than 14 rows",
            BoardParseError::RowWidth { .. } => "board row is not 10 cells wide",
            BoardParseError::UnknownElement { .. } => "board cell is not one of F W R D .",
        }
    }
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoardParseError::TooManyRows { rows } => {
                write!(f, "{} (got {rows})", self.message())
            }
            BoardParseError::RowWidth { row, width } => {
                write!(f, "{} (row {row} has {width})", self.message())
            }
            BoardParseError::UnknownElement { row, col, ch } => {
                write!(f, "{} (row {row}, col {col}: {ch:?})", self.message())
            }
        }
    }
}

impl std::error::Error for BoardParseError {}
