use crate::piece::Piece;
use crate::types::{ElementKind, GRID_COLS, GRID_ROWS, UPCOMING_LEN};

/// Plain-data view of a session for renderers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[ElementKind; GRID_COLS as usize]; GRID_ROWS as usize],
    pub active: Option<Piece>,
    /// Anchor row of the active piece after a hard drop
    pub ghost_row: Option<i8>,
    pub upcoming: [Option<Piece>; UPCOMING_LEN],
    pub score: i64,
    pub level: u32,
    pub lines: u32,
    pub tick_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Kind at (row, col), `None` outside the grid
    pub fn kind_at(&self, row: i8, col: i8) -> ElementKind {
        if row < 0 || col < 0 {
            return ElementKind::None;
        }
        self.grid
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or_default()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[ElementKind::None; GRID_COLS as usize]; GRID_ROWS as usize],
            active: None,
            ghost_row: None,
            upcoming: [None; UPCOMING_LEN],
            score: 0,
            level: 1,
            lines: 0,
            tick_interval_ms: 0,
            paused: false,
            game_over: false,
            episode_id: 0,
            seed: 0,
        }
    }
}
