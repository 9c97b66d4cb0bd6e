//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management and simulation logic
//! of a 3D falling-block game played in a rectangular prism. It has **no
//! dependencies** on terminals or real time, making it:
//!
//! - **Deterministic**: Same seed and the same inputs produce identical games
//! - **Testable**: Every rule is reachable without a renderer or wall clock
//! - **Portable**: Any host that can draw cubes and run a timer can drive it
//!
//! # Module Structure
//!
//! - [`orientation`]: exact quarter-turn rotations (the 24-element rotation group)
//! - [`cube`]: a single unit cell with translation, orientation and turn animation
//! - [`collision`]: pure boundary and occupancy predicates
//! - [`locked`]: settled cubes bucketed by row, row clearing with gravity shift
//! - [`piece`]: the ten piece templates and rigid-body moves
//! - [`rng`]: deterministic spawner that never repeats the previous kind
//! - [`queue`]: action queue that holds input back while a turn animates
//! - [`scoring`]: line-clear points, levels and fall intervals
//! - [`game_state`]: one game, advanced one tick at a time
//! - [`session`]: start/pause/reset/end lifecycle around a [`GameState`]
//! - [`clock`]: timer abstraction plus a manual clock for hosts and tests
//! - [`scene`]: renderable export of the current frame
//! - [`config`]: game settings from defaults, JSON and environment
//!
//! # Game Rules
//!
//! - Pieces spawn at the top center and fall one row per fall interval
//! - Pieces move left/right/front/back/down and turn 90° about any axis
//! - A downward move that is blocked locks the piece
//! - A horizontal layer with every cell filled is removed and the layers
//!   above drop by one
//! - Clearing `n` layers at once scores `1000 * 2^(n-1)`
//! - Every 1000 points raises the level and the fall speed; passing level 10 wins
//! - A new piece that overlaps the stack in the top two layers ends the game
//!
//! # Example
//!
//! ```
//! use tetris3d_core::{ManualClock, Session, GameConfig};
//! use tetris3d_core::types::{Action, SessionStatus, TranslateDir};
//!
//! let mut session = Session::new(GameConfig::default(), ManualClock::new());
//! session.start();
//!
//! session.enqueue_action(Action::Translate(TranslateDir::Left));
//! session.tick();
//!
//! session.enqueue_action(Action::HardDrop);
//! session.tick();
//!
//! assert_eq!(session.status(), SessionStatus::Running);
//! assert_eq!(session.game().grid().len(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) once per frame
//! (`TICK_MS` = 16ms). A turn advances 30° per tick, so it takes three ticks.
//! Automatic descent comes from the host's [`Clock`](clock::Clock), reported
//! back through [`Session::on_timer`](session::Session::on_timer).

pub mod clock;
pub mod collision;
pub mod config;
pub mod cube;
pub mod game_state;
pub mod locked;
pub mod orientation;
pub mod piece;
pub mod queue;
pub mod rng;
pub mod scene;
pub mod scoring;
pub mod session;

pub use tetris3d_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, TimerHandle};
pub use collision::{is_out_of_bounds, would_collide, Occupancy};
pub use config::{ConfigError, GameConfig};
pub use cube::Cube;
pub use game_state::{GameState, LockEvent, Outcome};
pub use locked::LockedGrid;
pub use orientation::Orientation;
pub use piece::Piece;
pub use queue::ActionQueue;
pub use rng::{PieceSpawner, SimpleRng};
pub use scene::{Scene, SceneCube, Scoreboard};
pub use session::Session;
