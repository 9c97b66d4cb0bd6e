//! Session module - game lifecycle, fall timer and scoreboard
//!
//! ```text
//! idle ──start──▶ running ◀──pause/resume──▶ paused
//!                   │  │                        │
//!                   │  └──────── end ───────────┤
//!                   ▼                           ▼
//!                  won                       gameOver
//! ```
//!
//! `reset` restarts from any state with the configuration of the current game;
//! `start` (only while no game is active) picks up the latest configuration.
//! The automatic fall is a periodic timer that enqueues a downward step. It is
//! cancelled on pause, end and the end of a game, and restarted with a fresh
//! interval after every lock.

use tracing::{debug, info, warn};

use crate::clock::{Clock, ManualClock, TimerHandle};
use crate::game_state::{GameState, LockEvent, Outcome};
use crate::scene::{Scene, Scoreboard};
use crate::types::{Action, Message, SessionStatus, TranslateDir};
use crate::{ConfigError, GameConfig};

#[derive(Debug)]
pub struct Session<C: Clock> {
    clock: C,
    config: GameConfig,
    game: GameState,
    status: SessionStatus,
    fall_timer: Option<TimerHandle>,
    message: Message,
    scoreboard_dirty: bool,
}

impl<C: Clock> Session<C> {
    pub fn new(config: GameConfig, clock: C) -> Self {
        Self {
            clock,
            game: GameState::new(config),
            config,
            status: SessionStatus::Idle,
            fall_timer: None,
            message: Message::None,
            scoreboard_dirty: true,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Mutable access to the running game, for scripted setups.
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    /// Configuration the next `start` will use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn message(&self) -> Message {
        self.message
    }

    /// Handle of the live fall timer, if any.
    pub fn fall_timer(&self) -> Option<TimerHandle> {
        self.fall_timer
    }

    /// Replace the configuration used by the next `start`.
    ///
    /// Only allowed while no game is running or paused.
    pub fn set_config(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        if self.status.is_active() {
            warn!("config change rejected: game in progress");
            return Err(ConfigError::SessionActive);
        }
        if let Err(e) = config.validate() {
            warn!(error = %e, "config change rejected");
            return Err(e);
        }
        self.config = config;
        debug!(?config, "config updated");
        Ok(())
    }

    /// Begin a new game with the current configuration.
    ///
    /// Returns `false` if a game is already running or paused.
    pub fn start(&mut self) -> bool {
        if self.status.is_active() {
            return false;
        }
        self.game = GameState::new(self.config);
        self.begin();
        true
    }

    /// Restart the current game from scratch, from any state.
    pub fn reset(&mut self) {
        self.begin();
    }

    pub fn pause(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.stop_fall_timer();
        self.status = SessionStatus::Paused;
        self.set_message(Message::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != SessionStatus::Paused {
            return false;
        }
        self.status = SessionStatus::Running;
        self.start_fall_timer();
        self.set_message(Message::None);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            SessionStatus::Running => self.pause(),
            SessionStatus::Paused => self.resume(),
            _ => false,
        }
    }

    /// Abandon the game in progress.
    pub fn end(&mut self) -> bool {
        if !self.status.is_active() {
            return false;
        }
        self.stop_fall_timer();
        self.status = SessionStatus::GameOver;
        self.set_message(Message::Ended);
        info!(score = self.game.score(), "game ended");
        true
    }

    /// Queue a gameplay action. Ignored unless running.
    pub fn enqueue_action(&mut self, action: Action) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.game.enqueue(action);
        true
    }

    /// A timer scheduled through this session's clock fired.
    ///
    /// Only the live fall timer has any effect.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.fall_timer != Some(handle) || self.status != SessionStatus::Running {
            return false;
        }
        self.game.enqueue(Action::Translate(TranslateDir::Down));
        true
    }

    /// Run one simulation step.
    pub fn tick(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        let acted = self.game.tick();
        if let Some(event) = self.game.take_last_event() {
            self.on_lock(event);
        }
        acted
    }

    /// Scoreboard, if it changed since the last call.
    pub fn take_scoreboard(&mut self) -> Option<Scoreboard> {
        if !self.scoreboard_dirty {
            return None;
        }
        self.scoreboard_dirty = false;
        Some(self.scoreboard())
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.game.score(),
            level: self.game.level(),
            message: self.message,
        }
    }

    pub fn scene_into(&self, out: &mut Scene) {
        self.game.scene_into(out);
        out.status = self.status;
        out.message = self.message;
    }

    pub fn scene(&self) -> Scene {
        let mut s = Scene::default();
        self.scene_into(&mut s);
        s
    }

    fn begin(&mut self) {
        self.stop_fall_timer();
        self.game.start();
        self.status = SessionStatus::Running;
        self.set_message(Message::None);
        self.start_fall_timer();
        info!(
            level = self.game.level(),
            grid = ?self.game.bounds().size(),
            "game started"
        );
    }

    fn on_lock(&mut self, event: LockEvent) {
        self.scoreboard_dirty = true;
        match event.outcome {
            Some(Outcome::Won) => {
                self.stop_fall_timer();
                self.status = SessionStatus::Won;
                self.set_message(Message::Win);
            }
            Some(Outcome::ToppedOut) => {
                self.stop_fall_timer();
                self.status = SessionStatus::GameOver;
                self.set_message(Message::GameOver);
            }
            None => {
                if event.lines_cleared > 0 {
                    self.set_message(Message::for_lines(event.lines_cleared));
                }
                self.start_fall_timer();
            }
        }
    }

    fn start_fall_timer(&mut self) {
        self.stop_fall_timer();
        let interval = self.game.fall_interval_ms();
        self.fall_timer = Some(self.clock.schedule_periodic(interval));
    }

    fn stop_fall_timer(&mut self) {
        if let Some(handle) = self.fall_timer.take() {
            self.clock.cancel(handle);
        }
    }

    fn set_message(&mut self, message: Message) {
        self.message = message;
        self.scoreboard_dirty = true;
    }
}

impl Session<ManualClock> {
    /// Advance the manual clock and deliver every firing.
    ///
    /// Returns the number of fall-timer firings that took effect.
    pub fn advance_clock(&mut self, elapsed_ms: u64) -> usize {
        let fired = self.clock.advance(elapsed_ms);
        fired.into_iter().filter(|&h| self.on_timer(h)).count()
    }
}

impl Default for Session<ManualClock> {
    fn default() -> Self {
        Self::new(GameConfig::default(), ManualClock::new())
    }
}
