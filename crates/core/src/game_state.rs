//! Game state module - manages the complete game state
//!
//! This module ties together the locked grid, the falling piece, the spawner,
//! the action queue and scoring. It executes one queued action per tick,
//! locks pieces, clears rows and decides when a game is won or lost. Timing
//! and pause handling live one level up, in the session.

use tracing::{debug, info};

use crate::cube::Cube;
use crate::locked::LockedGrid;
use crate::piece::Piece;
use crate::queue::ActionQueue;
use crate::rng::PieceSpawner;
use crate::scene::{Scene, SceneCube};
use crate::scoring::{fall_interval_ms, is_win, line_clear_score, next_level};
use crate::types::*;
use crate::GameConfig;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The level climbed past the last one.
    Won,
    /// A new piece spawned on top of the stack.
    ToppedOut,
}

/// What happened when the last piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub level: u32,
    pub level_changed: bool,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: LockedGrid,
    piece: Option<Piece>,
    spawner: PieceSpawner,
    queue: ActionQueue,
    score: u32,
    level: u32,
    lines: u32,
    pieces_spawned: u32,
    outcome: Option<Outcome>,
    /// Last lock event (consumed by the session).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a game with `config`. Nothing spawns until [`GameState::start`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            grid: LockedGrid::new(config.grid),
            piece: None,
            spawner: PieceSpawner::new(config.seed, config.piece_set),
            queue: ActionQueue::new(),
            score: 0,
            level: config.starting_level,
            lines: 0,
            pieces_spawned: 0,
            outcome: None,
            last_event: None,
            config,
        }
    }

    /// Clear everything and spawn the first piece.
    pub fn start(&mut self) {
        self.grid.reset();
        self.spawner.reset();
        self.queue.clear();
        self.score = 0;
        self.level = self.config.starting_level;
        self.lines = 0;
        self.pieces_spawned = 0;
        self.outcome = None;
        self.last_event = None;
        self.piece = None;
        self.spawn_next();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.config.grid
    }

    pub fn grid(&self) -> &LockedGrid {
        &self.grid
    }

    /// Direct access to the locked cubes, for scripted setups.
    pub fn grid_mut(&mut self) -> &mut LockedGrid {
        &mut self.grid
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Fall interval for the current level.
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.level)
    }

    /// Angle of the turn in progress (0 at rest or without a piece).
    pub fn turn_angle(&self) -> u32 {
        self.piece.as_ref().map_or(0, Piece::turn_angle)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Queue a player or timer action.
    pub fn enqueue(&mut self, action: Action) {
        let angle = self.turn_angle();
        self.queue.enqueue(action, angle);
    }

    /// Whether the falling piece may move one step in `dir`.
    ///
    /// A failed downward step locks the piece.
    pub fn can_translate(&mut self, dir: TranslateDir) -> bool {
        let Some(piece) = self.piece.as_ref() else {
            return false;
        };
        if piece.can_translate(dir, &self.grid, &self.config.grid) {
            return true;
        }
        if dir == TranslateDir::Down {
            self.lock();
        }
        false
    }

    /// Move the falling piece one step if legal.
    pub fn translate(&mut self, dir: TranslateDir) -> bool {
        if !self.can_translate(dir) {
            return false;
        }
        if let Some(piece) = self.piece.as_mut() {
            piece.shift(dir);
        }
        true
    }

    /// Move down until blocked, then lock. Returns the rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        let mut fallen = 0;
        while self.translate(TranslateDir::Down) {
            fallen += 1;
        }
        fallen
    }

    /// Whether a quarter turn in `dir` would end in a legal position.
    pub fn can_rotate(&self, dir: RotateDir) -> bool {
        self.piece
            .as_ref()
            .is_some_and(|p| p.can_rotate(dir, &self.grid, &self.config.grid))
    }

    /// Execute the current action, then pull the next one from the queue.
    ///
    /// Translations and drops finish within the tick. A turn advances by the
    /// configured step and is committed once it reaches 90°; a turn whose end
    /// position is illegal is dropped when it would start. Returns `false` if
    /// there was nothing to do.
    pub fn tick(&mut self) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        let Some(action) = self.queue.current() else {
            return false;
        };

        match action {
            Action::Translate(dir) => {
                self.queue.finish();
                self.translate(dir);
            }
            Action::HardDrop => {
                self.queue.finish();
                self.hard_drop();
            }
            Action::Rotate(dir) => {
                let step = self.config.rotation_step_deg;
                let done = match self.piece.as_mut() {
                    Some(piece) => {
                        !piece.rotate(dir, step, &self.grid, &self.config.grid) || piece.update_rotation_location()
                    }
                    None => true,
                };
                if done {
                    self.queue.finish();
                }
            }
        }

        if self.outcome.is_none() {
            let angle = self.turn_angle();
            self.queue.dequeue(angle);
        }
        true
    }

    /// Copy the falling piece into the grid, clear rows, score, and spawn.
    pub fn lock(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        for pos in piece.positions() {
            self.grid.push(Cube::locked(pos));
        }

        let lines = self.grid.clear_rows();
        let awarded = line_clear_score(lines);
        self.score = self.score.saturating_add(awarded);
        self.lines += lines;
        debug!(kind = piece.kind().as_str(), lines, "piece locked");
        if lines > 0 {
            info!(lines, score = self.score, "rows cleared");
        }

        let previous_level = self.level;
        let level = next_level(self.level, self.score, self.config.level_jump_score);
        if is_win(level) {
            self.level = MAX_LEVEL;
            self.outcome = Some(Outcome::Won);
            info!(score = self.score, "game won");
        } else {
            if level != previous_level {
                info!(level, "level up");
            }
            self.level = level;
            self.spawn_next();
        }

        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            lines_cleared: lines,
            score_awarded: awarded,
            level: self.level,
            level_changed: self.level != previous_level,
            outcome: self.outcome,
        });
    }

    /// Replace the falling piece with a fresh `kind` at the spawn anchor.
    pub fn respawn_as(&mut self, kind: PieceKind) {
        self.place(Piece::spawn(kind, &self.config.grid));
    }

    fn spawn_next(&mut self) {
        let kind = self.spawner.draw();
        self.pieces_spawned += 1;
        debug!(kind = kind.as_str(), n = self.pieces_spawned, "spawn");
        self.place(Piece::spawn(kind, &self.config.grid));
    }

    fn place(&mut self, piece: Piece) {
        if self.grid.game_over(&piece) {
            self.outcome = Some(Outcome::ToppedOut);
            info!(score = self.score, level = self.level, "game over");
        }
        self.piece = Some(piece);
    }

    /// Write the grid, piece and counters into `out`, reusing its buffers.
    pub fn scene_into(&self, out: &mut Scene) {
        out.bounds = self.config.grid;
        out.active.clear();
        if let Some(piece) = &self.piece {
            let kind = piece.kind();
            for c in piece.cubes() {
                out.active.push(SceneCube {
                    position: c.position(),
                    center: c.render_center(),
                    orientation: c.render_matrix(),
                    color: kind.color(),
                    kind: Some(kind),
                });
            }
        }
        out.locked.clear();
        out.locked
            .extend(self.grid.iter().map(|c| SceneCube::locked(c.position())));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.status = match self.outcome {
            Some(Outcome::Won) => SessionStatus::Won,
            Some(Outcome::ToppedOut) => SessionStatus::GameOver,
            None if self.piece.is_some() => SessionStatus::Running,
            None => SessionStatus::Idle,
        };
        out.message = Message::None;
    }

    pub fn scene(&self) -> Scene {
        let mut s = Scene::default();
        self.scene_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;

    fn started(grid: GridBounds) -> GameState {
        let mut game = GameState::new(GameConfig {
            grid,
            ..GameConfig::default()
        });
        game.start();
        game
    }

    fn fill_row_except(game: &mut GameState, y: i32, skip: impl Fn(i32, i32) -> bool) {
        let b = *game.bounds();
        for x in b.x_min..=b.x_max {
            for z in b.z_min..=b.z_max {
                if !skip(x, z) {
                    game.grid_mut().push(Cube::locked(GridPos::new(x, y, z)));
                }
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let game = GameState::default();
        assert!(game.piece().is_none());
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.fall_interval_ms(), 2000);
        assert!(!game.is_finished());
    }

    #[test]
    fn test_start_spawns_piece() {
        let game = started(GridBounds::CLASSIC);
        let piece = game.piece().unwrap();
        assert!(piece.positions().iter().any(|p| p.y == 6));
        assert_eq!(game.pieces_spawned(), 1);
    }

    #[test]
    fn test_translate_stops_at_wall() {
        let mut game = started(GridBounds::SMALL);
        game.respawn_as(PieceKind::T);
        assert!(game.translate(TranslateDir::Left));
        assert!(!game.translate(TranslateDir::Left));
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_failed_down_locks() {
        let mut game = started(GridBounds::SMALL);
        game.respawn_as(PieceKind::O);
        let mut steps = 0;
        while game.translate(TranslateDir::Down) {
            steps += 1;
        }
        // O spans two rows: from 4..=5 down to -5..=-4.
        assert_eq!(steps, 9);
        assert_eq!(game.grid().len(), 4);
        assert!(game.piece().is_some());
        let ev = game.take_last_event().unwrap();
        assert_eq!(ev.kind, PieceKind::O);
        assert_eq!(ev.lines_cleared, 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_failed_sideways_does_not_lock() {
        let mut game = started(GridBounds::SMALL);
        game.respawn_as(PieceKind::I);
        assert!(!game.can_translate(TranslateDir::Left));
        assert!(!game.can_translate(TranslateDir::Right));
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_hard_drop_empty_grid() {
        let mut game = started(GridBounds::CLASSIC);
        game.respawn_as(PieceKind::I);
        assert_eq!(game.hard_drop(), 12);
        assert_eq!(game.grid().row(-6).len(), 4);
        assert!(game.take_last_event().is_some());
    }

    #[test]
    fn test_single_row_clear() {
        let mut game = started(GridBounds::SMALL);
        fill_row_except(&mut game, -5, |_, z| z == 0);
        game.respawn_as(PieceKind::I);
        game.hard_drop();
        assert_eq!(game.score(), 1000);
        assert_eq!(game.lines(), 1);
        assert_eq!(game.level(), 2);
        assert_eq!(game.fall_interval_ms(), 1500);
        assert!(game.grid().is_empty());
        let ev = game.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.score_awarded, 1000);
        assert!(ev.level_changed);
        assert_eq!(ev.outcome, None);
    }

    #[test]
    fn test_tetris_through_queue() {
        let mut game = started(GridBounds::SMALL);
        for y in -5..=-2 {
            fill_row_except(&mut game, y, |x, z| x == 0 && z == 0);
        }
        game.respawn_as(PieceKind::I);

        for _ in 0..2 {
            game.enqueue(Action::Translate(TranslateDir::Down));
            assert!(game.tick());
        }
        game.enqueue(Action::Rotate(RotateDir::ZPos));
        for _ in 0..3 {
            assert!(game.tick());
        }
        let piece = game.piece().unwrap();
        assert!(piece.positions().iter().all(|p| p.x == 0 && p.z == 0));

        game.enqueue(Action::HardDrop);
        game.tick();
        assert_eq!(game.score(), 8000);
        assert_eq!(game.lines(), 4);
        assert_eq!(game.level(), 9);
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_zero_lines_keeps_score_and_level() {
        let mut game = started(GridBounds::CLASSIC);
        game.hard_drop();
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        let ev = game.take_last_event().unwrap();
        assert!(!ev.level_changed);
    }

    #[test]
    fn test_level_never_below_starting() {
        let mut game = GameState::new(GameConfig {
            grid: GridBounds::SMALL,
            starting_level: 5,
            ..GameConfig::default()
        });
        game.start();
        assert_eq!(game.fall_interval_ms(), 800);
        fill_row_except(&mut game, -5, |_, z| z == 0);
        game.respawn_as(PieceKind::I);
        game.hard_drop();
        assert_eq!(game.score(), 1000);
        assert_eq!(game.level(), 5);
    }

    #[test]
    fn test_win_when_level_passes_max() {
        let mut game = GameState::new(GameConfig {
            grid: GridBounds::SMALL,
            level_jump_score: 100,
            ..GameConfig::default()
        });
        game.start();
        fill_row_except(&mut game, -5, |_, z| z == 0);
        game.respawn_as(PieceKind::I);
        game.hard_drop();
        assert_eq!(game.outcome(), Some(Outcome::Won));
        assert_eq!(game.level(), MAX_LEVEL);
        assert!(game.piece().is_none());
        assert_eq!(game.take_last_event().unwrap().outcome, Some(Outcome::Won));
        game.enqueue(Action::Translate(TranslateDir::Left));
        assert!(!game.tick());
    }

    #[test]
    fn test_game_over_on_spawn_overlap() {
        let mut game = started(GridBounds::SMALL);
        fill_row_except(&mut game, 4, |x, z| x == 1 && z == 1);
        game.respawn_as(PieceKind::I);
        assert!(!game.is_finished());
        assert!(!game.translate(TranslateDir::Down));
        assert_eq!(game.outcome(), Some(Outcome::ToppedOut));
        assert_eq!(game.take_last_event().unwrap().outcome, Some(Outcome::ToppedOut));
    }

    #[test]
    fn test_rotation_blocks_queue_until_committed() {
        let mut game = started(GridBounds::CLASSIC);
        game.respawn_as(PieceKind::T);
        game.translate(TranslateDir::Down);
        game.enqueue(Action::Rotate(RotateDir::YPos));
        game.enqueue(Action::Translate(TranslateDir::Left));

        game.tick();
        assert_eq!(game.turn_angle(), 30);
        assert_eq!(game.queue().len(), 1);
        game.tick();
        assert_eq!(game.turn_angle(), 60);
        assert_eq!(game.queue().current(), Some(Action::Rotate(RotateDir::YPos)));
        game.tick();
        assert_eq!(game.turn_angle(), 0);
        assert_eq!(game.queue().current(), Some(Action::Translate(TranslateDir::Left)));
        game.tick();
        assert!(game.queue().is_empty());
    }

    #[test]
    fn test_queued_rotations_compose() {
        let mut game = started(GridBounds::CLASSIC);
        game.respawn_as(PieceKind::L);
        game.translate(TranslateDir::Down);
        game.translate(TranslateDir::Down);
        game.enqueue(Action::Rotate(RotateDir::YPos));
        game.enqueue(Action::Rotate(RotateDir::XNeg));
        for _ in 0..6 {
            game.tick();
        }
        let expected = Orientation::IDENTITY.then(RotateDir::YPos).then(RotateDir::XNeg);
        for c in game.piece().unwrap().cubes() {
            assert_eq!(c.orientation(), expected);
        }
    }

    #[test]
    fn test_illegal_rotation_rejected_at_start() {
        let mut game = started(GridBounds::CLASSIC);
        game.respawn_as(PieceKind::T);
        assert!(!game.can_rotate(RotateDir::ZPos));
        let before = *game.piece().unwrap();
        game.enqueue(Action::Rotate(RotateDir::ZPos));
        game.enqueue(Action::Translate(TranslateDir::Front));
        game.tick();
        assert_eq!(game.turn_angle(), 0);
        assert_eq!(game.piece().unwrap().cubes()[0].orientation(), before.cubes()[0].orientation());
        assert_eq!(game.queue().current(), Some(Action::Translate(TranslateDir::Front)));
        game.tick();
        assert_ne!(game.piece().unwrap().positions(), before.positions());
    }

    #[test]
    fn test_start_resets_state() {
        let mut game = started(GridBounds::SMALL);
        fill_row_except(&mut game, -5, |_, z| z == 0);
        game.respawn_as(PieceKind::I);
        game.hard_drop();
        game.hard_drop();
        game.start();
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert!(game.grid().is_empty());
        assert_eq!(game.pieces_spawned(), 1);
    }

    #[test]
    fn test_scene_into() {
        let mut game = started(GridBounds::CLASSIC);
        game.hard_drop();
        let mut scene = Scene::default();
        game.scene_into(&mut scene);
        assert_eq!(scene.active.len(), 4);
        assert_eq!(scene.locked.len(), 4);
        assert!(scene.locked.iter().all(|c| c.color == LOCKED_COLOR && c.kind.is_none()));
        assert_eq!(scene.bounds, GridBounds::CLASSIC);
        assert_eq!(scene.status, SessionStatus::Running);
        let kind = game.piece().unwrap().kind();
        assert!(scene.active.iter().all(|c| c.kind == Some(kind)));
    }
}
