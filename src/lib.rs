//! Element Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one `element_tetris::{core,input,term,types}`
//! path; the implementation lives in dedicated crates under `crates/`.

pub use element_tetris_core as core;
pub use element_tetris_input as input;
pub use element_tetris_term as term;
pub use element_tetris_types as types;
