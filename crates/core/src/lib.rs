//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the element game: the grid, pieces, collision, the
//! element reactions, the lock-and-resolve pipeline and the session that drives them.
//! It performs no I/O besides `tracing` logs, so the same session runs in the
//! terminal, in tests and in benchmarks.
//!
//! # Module Structure
//!
//! - [`grid`]: 14x10 board of element cells and the text board format
//! - [`piece`]: element shapes, clockwise rotation and column kicks
//! - [`collision`]: piece-versus-grid checks with an open top edge
//! - [`rules`]: Fire/Water annihilation and Dynamite detonation
//! - [`resolve`]: reactions, same-kind line clears and gravity run to a fixpoint
//! - [`rng`]: seeded element bag and piece generator
//! - [`scoring`]: line-clear points, leveling and the speed curve
//! - [`session`]: command handling, locking, spawning and game over
//! - [`snapshot`]: plain-data state for rendering
//!
//! # Game Rules
//!
//! - **Elements**: every piece is a single Fire, Water, Rock or Dynamite cell
//! - **Reactions**: Fire and Water stacked vertically cancel (+20); Dynamite on Rock
//!   destroys it (+50); Dynamite on anything else, or on the floor, fizzles (-10)
//! - **Lines**: only a full row of one element clears (100 per row, times combo + 1)
//! - **Gravity**: after removals every column collapses to the floor, and moved cells
//!   react again
//! - **Speed**: one level per 2 lines; the drop timer goes from 400 ms down to 40 ms
//!
//! # Example
//!
//! ```
//! use element_tetris_core::GameSession;
//! use element_tetris_types::{Command, GameEvent};
//!
//! let mut session = GameSession::new(12345);
//!
//! session.apply(Command::MOVE_RIGHT);
//! session.apply(Command::Rotate);
//! let events = session.apply(Command::HardDrop);
//!
//! assert!(events.contains(&GameEvent::PieceLocked));
//! assert_eq!(session.pieces_locked(), 1);
//! assert!(session.active().is_some()); // next piece spawned
//! ```

pub mod collision;
pub mod grid;
pub mod piece;
pub mod resolve;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use element_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::{collides, drop_distance};
pub use grid::{BoardParseError, Cell, Grid};
pub use piece::{tetromino_mask, try_rotate, Piece, Shape};
pub use resolve::{apply_gravity_to, resolve, Resolution};
pub use rng::{ElementBag, PieceGenerator};
pub use rules::{interaction_at, Interaction, Reaction};
pub use scoring::{level_for_lines, line_clear_score, tick_interval_ms};
pub use session::{GameSession, SessionBuilder};
pub use snapshot::GameSnapshot;
