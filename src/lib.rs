//! 3D Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, tests and
//! benches can write `tetris3d::{core,input,term,types}`.

pub use tetris3d_core as core;
pub use tetris3d_input as input;
pub use tetris3d_term as term;
pub use tetris3d_types as types;
