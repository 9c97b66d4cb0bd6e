use arrayvec::ArrayVec;

use crate::types::{GridBounds, GridPos, Message, PieceKind, Rgb, SessionStatus, LOCKED_COLOR};

/// One drawable unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCube {
    /// Resting cell.
    pub position: GridPos,
    /// Cube center including an in-progress turn.
    pub center: [f32; 3],
    /// Orientation including an in-progress turn.
    pub orientation: [[f32; 3]; 3],
    pub color: Rgb,
    /// `None` for locked cubes.
    pub kind: Option<PieceKind>,
}

impl SceneCube {
    pub fn locked(position: GridPos) -> Self {
        Self {
            position,
            center: position.to_array().map(|v| v as f32),
            orientation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            color: LOCKED_COLOR,
            kind: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scoreboard {
    pub score: u32,
    pub level: u32,
    pub message: Message,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub bounds: GridBounds,
    pub active: ArrayVec<SceneCube, 4>,
    pub locked: Vec<SceneCube>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: SessionStatus,
    pub message: Message,
}

impl Scene {
    pub fn clear(&mut self) {
        self.active.clear();
        self.locked.clear();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.status = SessionStatus::Idle;
        self.message = Message::None;
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.score,
            level: self.level,
            message: self.message,
        }
    }

    pub fn playable(&self) -> bool {
        self.status == SessionStatus::Running
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            bounds: GridBounds::default(),
            active: ArrayVec::new(),
            locked: Vec::new(),
            score: 0,
            level: 0,
            lines: 0,
            status: SessionStatus::Idle,
            message: Message::None,
        }
    }
}
