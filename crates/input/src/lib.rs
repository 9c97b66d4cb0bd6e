//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`Command`]s: gameplay actions for the session's action queue
//! plus the session controls (start, pause, reset, end).

pub mod map;

pub use tetris3d_types as types;

pub use map::{handle_key_event, should_quit, Command};
