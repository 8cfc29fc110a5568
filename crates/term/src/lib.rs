//! Terminal front-end for the element game.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! [`GameView`] paints a [`core::GameSnapshot`] into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes only what changed since the previous frame.
//! Board cells are 2 columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use element_tetris_core as core;
pub use element_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{element_color, element_glyph, feedback_text, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
