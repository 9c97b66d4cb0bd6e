//! Game configuration
//!
//! Settings are read once when a game starts. They come from defaults, an
//! optional JSON file and `TETRIS3D_*` environment variables, in that order.
//!
//! ```json
//! {
//!   "grid": "medium",
//!   "starting_level": 3,
//!   "piece_set": "classic",
//!   "seed": 7
//! }
//! ```
//!
//! `grid` also accepts explicit bounds:
//! `{"x_min": -2, "x_max": 2, "y_min": -7, "y_max": 6, "z_min": -2, "z_max": 2}`.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    GridBounds, GridPreset, PieceSet, LEVEL_JUMP_SCORE, MAX_LEVEL, MIN_LEVEL, QUARTER_TURN_DEG,
    ROTATION_STEP_DEG,
};

pub const ENV_CONFIG: &str = "TETRIS3D_CONFIG";
pub const ENV_GRID: &str = "TETRIS3D_GRID";
pub const ENV_LEVEL: &str = "TETRIS3D_LEVEL";
pub const ENV_PIECES: &str = "TETRIS3D_PIECES";
pub const ENV_SEED: &str = "TETRIS3D_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid bounds {0:?}")]
    InvalidGrid(GridBounds),
    #[error("starting level {0} is outside 1..=10")]
    InvalidLevel(u32),
    #[error("rotation step {0} must be a positive divisor of 90")]
    InvalidRotationStep(u32),
    #[error("level jump score must be positive")]
    InvalidLevelJumpScore,
    #[error("unknown grid preset `{0}`")]
    UnknownPreset(String),
    #[error("unknown piece set `{0}`")]
    UnknownPieceSet(String),
    #[error("bad value `{value}` for {var}")]
    Env { var: &'static str, value: String },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration cannot change while a game is active")]
    SessionActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: GridBounds,
    pub starting_level: u32,
    pub piece_set: PieceSet,
    pub seed: u32,
    /// Degrees a turn advances per tick.
    pub rotation_step_deg: u32,
    pub level_jump_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridBounds::default(),
            starting_level: MIN_LEVEL,
            piece_set: PieceSet::default(),
            seed: 1,
            rotation_step_deg: ROTATION_STEP_DEG,
            level_jump_score: LEVEL_JUMP_SCORE,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    grid: Option<RawGrid>,
    starting_level: Option<u32>,
    piece_set: Option<String>,
    seed: Option<u32>,
    rotation_step_deg: Option<u32>,
    level_jump_score: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGrid {
    Preset(String),
    Bounds {
        x_min: i32,
        x_max: i32,
        y_min: i32,
        y_max: i32,
        z_min: i32,
        z_max: i32,
    },
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = self.grid;
        if GridBounds::new(g.x_min, g.x_max, g.y_min, g.y_max, g.z_min, g.z_max).is_none() {
            return Err(ConfigError::InvalidGrid(g));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.starting_level) {
            return Err(ConfigError::InvalidLevel(self.starting_level));
        }
        let step = self.rotation_step_deg;
        if step == 0 || QUARTER_TURN_DEG % step != 0 {
            return Err(ConfigError::InvalidRotationStep(step));
        }
        if self.level_jump_score == 0 {
            return Err(ConfigError::InvalidLevelJumpScore);
        }
        Ok(())
    }

    /// Parse a JSON document on top of the defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(s)?;
        let mut config = Self::default();
        if let Some(grid) = raw.grid {
            config.grid = match grid {
                RawGrid::Preset(name) => parse_grid(&name)?,
                RawGrid::Bounds {
                    x_min,
                    x_max,
                    y_min,
                    y_max,
                    z_min,
                    z_max,
                } => GridBounds {
                    x_min,
                    x_max,
                    y_min,
                    y_max,
                    z_min,
                    z_max,
                },
            };
        }
        if let Some(level) = raw.starting_level {
            config.starting_level = level;
        }
        if let Some(name) = raw.piece_set {
            config.piece_set = PieceSet::from_str(&name).ok_or(ConfigError::UnknownPieceSet(name))?;
        }
        if let Some(seed) = raw.seed {
            config.seed = seed;
        }
        if let Some(step) = raw.rotation_step_deg {
            config.rotation_step_deg = step;
        }
        if let Some(jump) = raw.level_jump_score {
            config.level_jump_score = jump;
        }
        config.validate()?;
        Ok(config)
    }

    /// Build from the process environment.
    ///
    /// `TETRIS3D_CONFIG` names a JSON file loaded first; the other variables
    /// override individual fields.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(ENV_CONFIG)) {
            Some(path) => {
                let path = PathBuf::from(path);
                let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
                Self::from_json_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Override fields from `TETRIS3D_GRID`, `TETRIS3D_LEVEL`,
    /// `TETRIS3D_PIECES` and `TETRIS3D_SEED`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_empty(lookup(ENV_GRID)) {
            self.grid = parse_grid(&v)?;
        }
        if let Some(v) = non_empty(lookup(ENV_LEVEL)) {
            self.starting_level = v.parse().map_err(|_| ConfigError::Env {
                var: ENV_LEVEL,
                value: v.clone(),
            })?;
        }
        if let Some(v) = non_empty(lookup(ENV_PIECES)) {
            self.piece_set = PieceSet::from_str(&v).ok_or(ConfigError::UnknownPieceSet(v))?;
        }
        if let Some(v) = non_empty(lookup(ENV_SEED)) {
            self.seed = v.parse().map_err(|_| ConfigError::Env {
                var: ENV_SEED,
                value: v.clone(),
            })?;
        }
        self.validate()
    }
}

fn parse_grid(name: &str) -> Result<GridBounds, ConfigError> {
    GridPreset::from_str(name)
        .map(GridPreset::bounds)
        .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
