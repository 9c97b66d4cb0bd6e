//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It does not use ratatui
//! widgets or layout; it renders a [`Scene`](crate::core::Scene) into a plain
//! framebuffer that is then flushed to a terminal backend.
//!
//! A 3D grid does not fit a terminal directly, so the view draws three
//! orthographic projections (front, side and top) next to each other, with
//! the nearest cube winning each projected cell.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris3d_core as core;
pub use tetris3d_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Projection, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
