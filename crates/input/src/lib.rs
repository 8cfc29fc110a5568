//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::Command`]s. Key repeat is left to
//! the terminal: every press is one command.

pub mod map;

pub use element_tetris_types as types;

pub use map::{handle_key_event, should_quit};
