//! Session module - one game from spawn to game over
//!
//! [`GameSession`] owns the grid, the falling piece, the upcoming queue and the piece
//! generator. Drivers talk to it only through [`Command`]s and read back the
//! [`GameEvent`]s each command produced, plus a [`GameSnapshot`] for rendering.
//!
//! Locking writes the piece into a copy of the grid, runs [`resolve`] on that copy
//! and swaps the result in only once the cycle is complete.

use std::collections::VecDeque;

use tracing::debug;

use crate::collision::{collides, drop_distance};
use crate::grid::{Cell, Grid};
use crate::piece::{try_rotate, Piece};
use crate::resolve::{resolve, CellList};
use crate::rng::PieceGenerator;
use crate::scoring::{level_for_lines, tick_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, GameEvent, Offset, ShapePolicy, INITIAL_TICK_MS, UPCOMING_LEN};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    active: Option<Piece>,
    upcoming: VecDeque<Piece>,
    generator: PieceGenerator,
    score: i64,
    level: u32,
    lines: u32,
    tick_interval_ms: u32,
    paused: bool,
    game_over: bool,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Pieces locked this episode
    pieces_locked: u32,
}

impl GameSession {
    /// New session with the default (single element) pieces
    pub fn new(seed: u64) -> Self {
        Self::builder().seed(seed).build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Fresh state on top of an existing generator; pieces are drawn at level 1
    fn start(grid: Grid, mut generator: PieceGenerator, episode_id: u32) -> Self {
        let upcoming = (0..UPCOMING_LEN)
            .map(|_| generator.create_piece(1))
            .collect();
        let active = generator.create_piece(1);
        let game_over = collides(&active, &grid, Offset::ZERO);

        Self {
            grid,
            active: (!game_over).then_some(active),
            upcoming,
            generator,
            score: 0,
            level: 1,
            lines: 0,
            tick_interval_ms: INITIAL_TICK_MS,
            paused: false,
            game_over,
            episode_id,
            pieces_locked: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Queued pieces, next first
    pub fn upcoming(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.upcoming.iter()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current soft-drop timer interval
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    pub fn shape_policy(&self) -> ShapePolicy {
        self.generator.policy()
    }

    /// Row the active piece's anchor would land on
    pub fn ghost_row(&self) -> Option<i8> {
        let piece = self.active?;
        Some(piece.lowered(drop_distance(&piece, &self.grid)).anchor.row)
    }

    /// True while commands other than pause/restart have an effect
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Apply a command and return the events it produced
    pub fn apply(&mut self, command: Command) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.apply_into(command, &mut events);
        events
    }

    /// Apply a command, appending its events to `events`.
    ///
    /// Once the game is over only [`Command::Restart`] is accepted. While paused,
    /// movement and drops are ignored and produce no events.
    pub fn apply_into(&mut self, command: Command, events: &mut Vec<GameEvent>) {
        if self.game_over && command != Command::Restart {
            return;
        }

        match command {
            Command::Pause => {
                self.paused = !self.paused;
                events.push(GameEvent::PauseToggled {
                    paused: self.paused,
                });
            }
            Command::Restart => {
                self.reset();
                events.push(GameEvent::Restarted);
            }
            _ if self.paused => {}
            Command::Move {
                row_delta,
                col_delta,
            } => self.move_into(Offset::new(row_delta, col_delta), events),
            Command::Rotate => self.rotate_into(events),
            Command::SoftDrop => self.soft_drop_into(events),
            Command::HardDrop => self.hard_drop_into(events),
        }
    }

    /// Translate the active piece; blocked moves leave it in place
    pub fn move_by(&mut self, offset: Offset) -> Vec<GameEvent> {
        self.apply(Command::Move {
            row_delta: offset.row,
            col_delta: offset.col,
        })
    }

    pub fn rotate(&mut self) -> Vec<GameEvent> {
        self.apply(Command::Rotate)
    }

    /// One row down, locking if the piece is resting
    pub fn soft_drop(&mut self) -> Vec<GameEvent> {
        self.apply(Command::SoftDrop)
    }

    pub fn hard_drop(&mut self) -> Vec<GameEvent> {
        self.apply(Command::HardDrop)
    }

    pub fn toggle_pause(&mut self) -> Vec<GameEvent> {
        self.apply(Command::Pause)
    }

    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.apply(Command::Restart)
    }

    fn move_into(&mut self, offset: Offset, events: &mut Vec<GameEvent>) {
        let Some(piece) = self.active else {
            return;
        };

        let applied = !collides(&piece, &self.grid, offset);
        if applied {
            self.active = Some(piece.translated(offset));
        }
        events.push(GameEvent::PieceMoved { applied });
    }

    fn rotate_into(&mut self, events: &mut Vec<GameEvent>) {
        let Some(piece) = self.active else {
            return;
        };

        let grid = &self.grid;
        let rotated = try_rotate(&piece, |p, kick| collides(p, grid, kick));
        let applied = rotated.is_some();
        if let Some((placed, _)) = rotated {
            self.active = Some(placed);
        }
        events.push(GameEvent::PieceRotated { applied });
    }

    fn soft_drop_into(&mut self, events: &mut Vec<GameEvent>) {
        let Some(piece) = self.active else {
            return;
        };

        if collides(&piece, &self.grid, Offset::DOWN) {
            self.lock(piece, events);
        } else {
            self.active = Some(piece.translated(Offset::DOWN));
        }
    }

    fn hard_drop_into(&mut self, events: &mut Vec<GameEvent>) {
        let Some(piece) = self.active else {
            return;
        };

        let distance = drop_distance(&piece, &self.grid);
        let dropped = piece.lowered(distance);
        self.active = Some(dropped);
        events.push(GameEvent::HardDropped { distance });
        self.lock(dropped, events);
    }

    /// Merge `piece` into the grid, resolve, then advance the queue
    fn lock(&mut self, piece: Piece, events: &mut Vec<GameEvent>) {
        if piece.cells().any(|(pos, _)| pos.row < 0) {
            debug!(row = piece.anchor.row, "lock above the board, game over");
            self.end(events);
            return;
        }

        let mut grid = self.grid;
        let mut merged = CellList::new();
        for (pos, kind) in piece.cells() {
            if grid.set(pos.row, pos.col, Cell::new(kind)) {
                merged.push(pos);
            }
        }
        self.active = None;
        self.pieces_locked += 1;
        events.push(GameEvent::PieceLocked);

        let resolution = resolve(grid, &merged);
        events.extend_from_slice(&resolution.events);
        debug!(
            score_delta = resolution.score_delta,
            lines = resolution.lines_cleared,
            passes = resolution.passes,
            combo = resolution.combo,
            "piece locked"
        );

        self.grid = resolution.grid;

        let Some(&next) = self.upcoming.front() else {
            self.end(events);
            return;
        };
        if collides(&next, &self.grid, Offset::ZERO) {
            debug!("spawn blocked, game over");
            self.end(events);
            return;
        }

        // The refill piece is generated at the level in force before this lock.
        let refill = self.generator.create_piece(self.level);
        self.upcoming.pop_front();
        self.upcoming.push_back(refill);
        self.active = Some(next);

        self.score += resolution.score_delta;
        self.lines += resolution.lines_cleared;
        self.level = level_for_lines(self.lines);
        self.tick_interval_ms = tick_interval_ms(self.level);
    }

    fn end(&mut self, events: &mut Vec<GameEvent>) {
        self.game_over = true;
        self.active = None;
        events.push(GameEvent::GameOver);
        debug!(
            score = self.score,
            lines = self.lines,
            level = self.level,
            episode = self.episode_id,
            "game over"
        );
    }

    fn reset(&mut self) {
        let mut generator = self.generator.clone();
        generator.reset_bags();
        let episode_id = self.episode_id.wrapping_add(1);
        *self = Self::start(Grid::new(), generator, episode_id);
        debug!(episode = episode_id, "restart");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_kinds(&mut out.grid);
        out.active = self.active;
        out.ghost_row = self.ghost_row();
        out.upcoming = [None; UPCOMING_LEN];
        for (slot, piece) in out.upcoming.iter_mut().zip(self.upcoming.iter()) {
            *slot = Some(*piece);
        }
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.tick_interval_ms = self.tick_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.seed = self.generator.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Builder for sessions with a custom seed, shape policy, starting board or
/// scripted pieces (mainly for tests and the `--board` CLI option).
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    seed: Option<u64>,
    shape_policy: ShapePolicy,
    grid: Option<Grid>,
    active: Option<Piece>,
    upcoming: Vec<Piece>,
}

impl SessionBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn shape_policy(mut self, policy: ShapePolicy) -> Self {
        self.shape_policy = policy;
        self
    }

    /// Starting board (defaults to empty)
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Replace the first falling piece
    pub fn active(mut self, piece: Piece) -> Self {
        self.active = Some(piece);
        self
    }

    /// Script the upcoming queue, next piece first. Missing slots are generated and
    /// extra entries are ignored.
    pub fn upcoming(mut self, pieces: impl IntoIterator<Item = Piece>) -> Self {
        self.upcoming = pieces.into_iter().take(UPCOMING_LEN).collect();
        self
    }

    pub fn build(self) -> GameSession {
        let seed = self.seed.unwrap_or(1);
        let generator = PieceGenerator::new(seed, self.shape_policy);
        let mut session = GameSession::start(self.grid.unwrap_or_default(), generator, 0);

        for (slot, piece) in session.upcoming.iter_mut().zip(self.upcoming) {
            *slot = piece;
        }
        if let Some(piece) = self.active {
            session.game_over = collides(&piece, &session.grid, Offset::ZERO);
            session.active = (!session.game_over).then_some(piece);
        }
        session
    }
}
