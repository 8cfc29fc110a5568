//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9)
//! - **Rows**: 14 (indexed 0-13, row 0 is the spawn edge, row 13 is the floor)
//! - **Spawn anchor**: row 0, column 5
//!
//! # Speed Curve
//!
//! The soft-drop timer interval is recomputed on every successful lock:
//!
//! | Level | Interval |
//! |-------|----------|
//! | before first lock | 1000ms |
//! | 1 | 400ms |
//! | 2 | 370ms |
//! | 3 | 340ms |
//! | ... | -30ms per level |
//! | 13+ | 40ms floor |
//!
//! # Examples
//!
//! ```
//! use element_tetris_types::{Command, ElementKind, GRID_COLS, GRID_ROWS};
//!
//! let kind = ElementKind::from_str("fire").unwrap();
//! assert_eq!(kind, ElementKind::Fire);
//! assert!(kind.is_occupied());
//!
//! let cmd = Command::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, Command::MOVE_LEFT);
//!
//! assert_eq!(GRID_COLS, 10);
//! assert_eq!(GRID_ROWS, 14);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_COLS: u8 = 10;

/// Grid height in cells (14 rows)
pub const GRID_ROWS: u8 = 14;

/// Column where new pieces are anchored (`GRID_COLS / 2`)
pub const SPAWN_COL: i8 = (GRID_COLS / 2) as i8;

/// Number of pieces kept in the preview queue
pub const UPCOMING_LEN: usize = 3;

/// Soft-drop interval until the first successful lock of a session
pub const INITIAL_TICK_MS: u32 = 1000;

/// Soft-drop interval at level 1
pub const BASE_TICK_MS: u32 = 400;

/// Interval reduction per level
pub const TICK_STEP_MS: u32 = 30;

/// Fastest soft-drop interval
pub const MIN_TICK_MS: u32 = 40;

/// Cleared rows needed per level
pub const LINES_PER_LEVEL: u32 = 2;

/// Score for a Fire/Water annihilation
pub const EXTINGUISH_SCORE: i64 = 20;

/// Score for Dynamite destroying a Rock
pub const ROCK_DESTROYED_SCORE: i64 = 50;

/// Penalty for Dynamite landing on anything other than Rock
pub const DYNAMITE_WASTED_SCORE: i64 = -10;

/// Base score per cleared row, multiplied by `combo + 1`
pub const LINE_CLEAR_BASE: i64 = 100;

/// Levels above this add one Dynamite to each refilled bag
pub const EXTRA_DYNAMITE_LEVEL: u32 = 5;

/// Levels above this add one Rock to each refilled bag
pub const EXTRA_ROCK_LEVEL: u32 = 10;

/// Base bag composition: 4 Fire, 4 Water, 3 Rock, 2 Dynamite
pub const BAG_BASE: [ElementKind; 13] = [
    ElementKind::Fire,
    ElementKind::Fire,
    ElementKind::Fire,
    ElementKind::Fire,
    ElementKind::Water,
    ElementKind::Water,
    ElementKind::Water,
    ElementKind::Water,
    ElementKind::Rock,
    ElementKind::Rock,
    ElementKind::Rock,
    ElementKind::Dynamite,
    ElementKind::Dynamite,
];

/// Largest possible bag (base plus both level extras)
pub const BAG_CAPACITY: usize = BAG_BASE.len() + 2;

/// Upper bound on resolve passes for a single lock
pub const MAX_RESOLVE_PASSES: u32 = 4 * GRID_ROWS as u32;


/// The element carried by a cell or piece
///
/// - **Fire** and **Water** annihilate when vertically adjacent
/// - **Dynamite** destroys a Rock directly below it, and is wasted on anything else
/// - **Rock** never initiates a reaction
/// - **None** marks an empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    Fire,
    Water,
    Rock,
    Dynamite,
    #[default]
    None,
}

impl ElementKind {
    /// The four real elements, in bag order
    pub const ELEMENTS: [ElementKind; 4] = [
        ElementKind::Fire,
        ElementKind::Water,
        ElementKind::Rock,
        ElementKind::Dynamite,
    ];

    /// Parse element kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use element_tetris_types::ElementKind;
    ///
    /// assert_eq!(ElementKind::from_str("Water"), Some(ElementKind::Water));
    /// assert_eq!(ElementKind::from_str("none"), Some(ElementKind::None));
    /// assert_eq!(ElementKind::from_str("lava"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fire" => Some(ElementKind::Fire),
            "water" => Some(ElementKind::Water),
            "rock" => Some(ElementKind::Rock),
            "dynamite" => Some(ElementKind::Dynamite),
            "none" => Some(ElementKind::None),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Fire => "fire",
            ElementKind::Water => "water",
            ElementKind::Rock => "rock",
            ElementKind::Dynamite => "dynamite",
            ElementKind::None => "none",
        }
    }

    /// Parse the single-letter board notation (`F`, `W`, `R`, `D`, `.` or space)
    ///
    /// ```
    /// use element_tetris_types::ElementKind;
    ///
    /// assert_eq!(ElementKind::from_char('r'), Some(ElementKind::Rock));
    /// assert_eq!(ElementKind::from_char('.'), Some(ElementKind::None));
    /// assert_eq!(ElementKind::from_char('x'), None);
    /// ```
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'F' => Some(ElementKind::Fire),
            'W' => Some(ElementKind::Water),
            'R' => Some(ElementKind::Rock),
            'D' => Some(ElementKind::Dynamite),
            '.' | ' ' => Some(ElementKind::None),
            _ => None,
        }
    }

    /// Single-letter board notation
    pub fn as_char(&self) -> char {
        match self {
            ElementKind::Fire => 'F',
            ElementKind::Water => 'W',
            ElementKind::Rock => 'R',
            ElementKind::Dynamite => 'D',
            ElementKind::None => '.',
        }
    }

    pub fn is_occupied(&self) -> bool {
        *self != ElementKind::None
    }

    pub fn is_none(&self) -> bool {
        *self == ElementKind::None
    }
}

/// The seven tetromino outlines available under [`ShapePolicy::Tetromino`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];
}

/// Which shapes the piece generator produces
///
/// The stock rule set only ever spawns single cells; the tetromino table is kept
/// behind this switch so the shape-agnostic engine can be exercised with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapePolicy {
    #[default]
    Monomino,
    Tetromino,
}

impl ShapePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monomino" | "single" | "1" => Some(ShapePolicy::Monomino),
            "tetromino" | "tetris" | "4" => Some(ShapePolicy::Tetromino),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapePolicy::Monomino => "monomino",
            ShapePolicy::Tetromino => "tetromino",
        }
    }
}

/// Grid coordinate; rows may be negative while a piece floats above the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Apply a translation, saturating at the `i8` range
    pub fn shifted(self, offset: Offset) -> Self {
        Self {
            row: self.row.saturating_add(offset.row),
            col: self.col.saturating_add(offset.col),
        }
    }

    /// Apply a translation; None if either coordinate leaves the `i8` range
    pub fn checked_shifted(self, offset: Offset) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(offset.row)?,
            col: self.col.checked_add(offset.col)?,
        })
    }
}

/// Relative translation applied to a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub row: i8,
    pub col: i8,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0, 0);
    pub const DOWN: Offset = Offset::new(1, 0);

    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// Discrete commands accepted by a game session
///
/// These are issued by the keyboard front-end and the soft-drop timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Translate the active piece if the target is free
    Move { row_delta: i8, col_delta: i8 },
    /// Rotate 90° clockwise with column kicks
    Rotate,
    /// Move down one row, locking when blocked
    SoftDrop,
    /// Drop to the lowest free row and lock
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
}

impl Command {
    pub const MOVE_LEFT: Command = Command::Move {
        row_delta: 0,
        col_delta: -1,
    };
    pub const MOVE_RIGHT: Command = Command::Move {
        row_delta: 0,
        col_delta: 1,
    };
    pub const MOVE_DOWN: Command = Command::Move {
        row_delta: 1,
        col_delta: 0,
    };

    /// Parse command from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use element_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("moveRight"), Some(Command::MOVE_RIGHT));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MOVE_LEFT),
            "moveright" => Some(Command::MOVE_RIGHT),
            "movedown" => Some(Command::MOVE_DOWN),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "pause" => Some(Command::Pause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Move {
                row_delta: 0,
                col_delta,
            } if *col_delta < 0 => "moveLeft",
            Command::Move {
                row_delta: 0,
                col_delta,
            } if *col_delta > 0 => "moveRight",
            Command::Move { .. } => "moveDown",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }
}

/// Feedback events produced by the engine
///
/// Emitted in the order they happen during a command. Collaborators use them for
/// sound, visual effects or status text; the engine never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A move command was handled; `applied` is false when it was blocked
    PieceMoved { applied: bool },
    /// A rotate command was handled; `applied` is false when every kick was blocked
    PieceRotated { applied: bool },
    /// The active piece was hard dropped by `distance` rows
    HardDropped { distance: u8 },
    /// The active piece was merged into the grid
    PieceLocked,
    /// A Fire/Water pair annihilated
    ElementExtinguished,
    /// Dynamite destroyed the Rock below it
    RockDestroyed,
    /// Dynamite landed on something other than Rock
    DynamiteWasted,
    /// Same-kind rows cleared in one resolve pass
    RowsCleared { count: u8, combo: u32 },
    PauseToggled { paused: bool },
    Restarted,
    GameOver,
}

impl GameEvent {
    /// Stable name for logs and feedback text
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::PieceMoved { .. } => "piece-moved",
            GameEvent::PieceRotated { .. } => "piece-rotated",
            GameEvent::HardDropped { .. } => "hard-dropped",
            GameEvent::PieceLocked => "piece-locked",
            GameEvent::ElementExtinguished => "extinguish",
            GameEvent::RockDestroyed => "rock-destroyed",
            GameEvent::DynamiteWasted => "dynamite-wasted",
            GameEvent::RowsCleared { .. } => "row-cleared",
            GameEvent::PauseToggled { .. } => "pause",
            GameEvent::Restarted => "restart",
            GameEvent::GameOver => "game-over",
        }
    }

    /// Events produced by the resolve pipeline (as opposed to piece control)
    pub fn is_reaction(&self) -> bool {
        matches!(
            self,
            GameEvent::ElementExtinguished
                | GameEvent::RockDestroyed
                | GameEvent::DynamiteWasted
                | GameEvent::RowsCleared { .. }
        )
    }
}
