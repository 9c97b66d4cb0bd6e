//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Grid Coordinates
//!
//! The play-field is a rectangular prism of unit cells addressed by integer
//! `(x, y, z)` coordinates:
//!
//! - **X**: left (negative) to right (positive)
//! - **Y**: bottom (negative) to top (positive); pieces fall towards `y_min`
//! - **Z**: back (negative) to front (positive)
//!
//! Bounds are inclusive on both ends and usually straddle the origin, so the
//! spawn anchor sits near `x = 0, z = 0`.
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Simulation/render tick (~60 FPS) |
//! | `ROTATION_STEP_DEG` | 30 | Animation progress per tick while turning |
//! | `QUARTER_TURN_DEG` | 90 | A completed turn |
//!
//! # Fall Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 2000ms |
//! | 2 | 1500ms |
//! | 3 | 1200ms |
//! | 4 | 1000ms |
//! | 5 | 800ms |
//! | 6 | 600ms |
//! | 7 | 400ms |
//! | 8 | 200ms |
//! | 9 | 100ms |
//! | 10 | 50ms |
//!
//! # Examples
//!
//! ```
//! use tetris3d_types::{Action, GridBounds, GridPos, RotateDir, TranslateDir};
//!
//! let bounds = GridBounds::SMALL;
//! assert_eq!(bounds.width(), 4);
//! assert_eq!(bounds.row_capacity(), 16);
//! assert!(bounds.contains(GridPos::new(0, 5, 0)));
//!
//! let action = Action::from_str("rotateXPos").unwrap();
//! assert_eq!(action, Action::Rotate(RotateDir::XPos));
//! assert_eq!(TranslateDir::Left.delta(), GridPos::new(-1, 0, 0));
//! ```

use std::ops::{Add, Neg, Sub};

/// Simulation tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Degrees a rotation animation advances per tick.
pub const ROTATION_STEP_DEG: u32 = 30;

/// A completed rotation.
pub const QUARTER_TURN_DEG: u32 = 90;

/// Lowest playable level.
pub const MIN_LEVEL: u32 = 1;

/// Highest playable level; climbing past it wins the game.
pub const MAX_LEVEL: u32 = 10;

/// Score needed per level.
pub const LEVEL_JUMP_SCORE: u32 = 1000;

/// Score for clearing a single row. Each extra simultaneous row doubles it.
pub const LINE_CLEAR_BASE_SCORE: u32 = 1000;

/// Fall intervals by level (milliseconds per row).
///
/// Index 0 is a placeholder so the table can be indexed by level directly.
pub const FALL_INTERVALS: [u32; 11] = [2000, 2000, 1500, 1200, 1000, 800, 600, 400, 200, 100, 50];

/// Smallest grid extent along X and Z that fits every piece template.
pub const MIN_FOOTPRINT: i32 = 4;

/// Smallest grid extent along Y.
pub const MIN_HEIGHT: i32 = 4;


/// Integer lattice position of a unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along `axis`.
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for GridPos {
    type Output = GridPos;

    fn neg(self) -> GridPos {
        GridPos::new(-self.x, -self.y, -self.z)
    }
}

/// One of the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Inclusive cell-index ranges of the play-field.
///
/// Construct through [`GridBounds::new`] (validated) or a [`GridPreset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridBounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    pub z_min: i32,
    pub z_max: i32,
}

impl GridBounds {
    /// 4x11x4 grid.
    pub const SMALL: GridBounds = GridBounds {
        x_min: -2,
        x_max: 1,
        y_min: -5,
        y_max: 5,
        z_min: -2,
        z_max: 1,
    };

    /// 5x14x5 grid.
    pub const MEDIUM: GridBounds = GridBounds {
        x_min: -2,
        x_max: 2,
        y_min: -7,
        y_max: 6,
        z_min: -2,
        z_max: 2,
    };

    /// 6x17x6 grid.
    pub const LARGE: GridBounds = GridBounds {
        x_min: -3,
        x_max: 2,
        y_min: -8,
        y_max: 8,
        z_min: -3,
        z_max: 2,
    };

    /// 7x13x7 grid.
    pub const CLASSIC: GridBounds = GridBounds {
        x_min: -3,
        x_max: 3,
        y_min: -6,
        y_max: 6,
        z_min: -3,
        z_max: 3,
    };

    /// Validated constructor.
    ///
    /// Returns `None` when a range is inverted or when the grid is too small to
    /// spawn every piece template (see [`MIN_FOOTPRINT`] and [`MIN_HEIGHT`]).
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32, z_min: i32, z_max: i32) -> Option<Self> {
        if x_min > x_max || y_min > y_max || z_min > z_max {
            return None;
        }
        let bounds = Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        };
        if bounds.width() < MIN_FOOTPRINT || bounds.depth() < MIN_FOOTPRINT || bounds.height() < MIN_HEIGHT {
            return None;
        }
        Some(bounds)
    }

    /// Cells along X.
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min + 1
    }

    /// Cells along Y.
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min + 1
    }

    /// Cells along Z.
    pub fn depth(&self) -> i32 {
        self.z_max - self.z_min + 1
    }

    /// `(width, height, depth)`
    pub fn size(&self) -> (i32, i32, i32) {
        (self.width(), self.height(), self.depth())
    }

    /// Number of cubes in a full horizontal row.
    pub fn row_capacity(&self) -> usize {
        (self.width() * self.depth()) as usize
    }

    /// Number of horizontal rows.
    pub fn row_count(&self) -> usize {
        self.height() as usize
    }

    pub fn min(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x_min,
            Axis::Y => self.y_min,
            Axis::Z => self.z_min,
        }
    }

    pub fn max(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x_max,
            Axis::Y => self.y_max,
            Axis::Z => self.z_max,
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| pos.get(axis) >= self.min(axis) && pos.get(axis) <= self.max(axis))
    }

    /// Top-center cell that piece templates are anchored at.
    pub fn spawn_anchor(&self) -> GridPos {
        GridPos::new(
            (self.x_min + self.x_max + 1).div_euclid(2),
            self.y_max,
            (self.z_min + self.z_max + 1).div_euclid(2),
        )
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        GridBounds::CLASSIC
    }
}

/// Named grid sizes selectable between games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridPreset {
    Small,
    Medium,
    Large,
    Classic,
}

impl GridPreset {
    pub const ALL: [GridPreset; 4] = [
        GridPreset::Small,
        GridPreset::Medium,
        GridPreset::Large,
        GridPreset::Classic,
    ];

    pub fn bounds(self) -> GridBounds {
        match self {
            GridPreset::Small => GridBounds::SMALL,
            GridPreset::Medium => GridBounds::MEDIUM,
            GridPreset::Large => GridBounds::LARGE,
            GridPreset::Classic => GridBounds::CLASSIC,
        }
    }

    /// Parse preset from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(GridPreset::Small),
            "medium" => Some(GridPreset::Medium),
            "large" => Some(GridPreset::Large),
            "classic" => Some(GridPreset::Classic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridPreset::Small => "small",
            GridPreset::Medium => "medium",
            GridPreset::Large => "large",
            GridPreset::Classic => "classic",
        }
    }
}

/// Unit translations a piece can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslateDir {
    Left,
    Right,
    Down,
    Front,
    Back,
}

impl TranslateDir {
    pub const ALL: [TranslateDir; 5] = [
        TranslateDir::Left,
        TranslateDir::Right,
        TranslateDir::Down,
        TranslateDir::Front,
        TranslateDir::Back,
    ];

    /// Unit offset of one step in this direction.
    pub fn delta(self) -> GridPos {
        match self {
            TranslateDir::Left => GridPos::new(-1, 0, 0),
            TranslateDir::Right => GridPos::new(1, 0, 0),
            TranslateDir::Down => GridPos::new(0, -1, 0),
            TranslateDir::Front => GridPos::new(0, 0, 1),
            TranslateDir::Back => GridPos::new(0, 0, -1),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            TranslateDir::Left | TranslateDir::Right => Axis::X,
            TranslateDir::Down => Axis::Y,
            TranslateDir::Front | TranslateDir::Back => Axis::Z,
        }
    }

    /// The boundary coordinate a cube must not already sit on to move this way.
    pub fn limit(self, bounds: &GridBounds) -> i32 {
        match self {
            TranslateDir::Left => bounds.x_min,
            TranslateDir::Right => bounds.x_max,
            TranslateDir::Down => bounds.y_min,
            TranslateDir::Front => bounds.z_max,
            TranslateDir::Back => bounds.z_min,
        }
    }
}

/// Quarter turns about a grid axis.
///
/// `Pos` turns counter-clockwise when looking down the positive axis towards
/// the origin (right-hand rule), `Neg` turns clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    XPos,
    XNeg,
    YPos,
    YNeg,
    ZPos,
    ZNeg,
}

impl RotateDir {
    pub const ALL: [RotateDir; 6] = [
        RotateDir::XPos,
        RotateDir::XNeg,
        RotateDir::YPos,
        RotateDir::YNeg,
        RotateDir::ZPos,
        RotateDir::ZNeg,
    ];

    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => RotateDir::XPos,
            (Axis::X, false) => RotateDir::XNeg,
            (Axis::Y, true) => RotateDir::YPos,
            (Axis::Y, false) => RotateDir::YNeg,
            (Axis::Z, true) => RotateDir::ZPos,
            (Axis::Z, false) => RotateDir::ZNeg,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            RotateDir::XPos | RotateDir::XNeg => Axis::X,
            RotateDir::YPos | RotateDir::YNeg => Axis::Y,
            RotateDir::ZPos | RotateDir::ZNeg => Axis::Z,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, RotateDir::XPos | RotateDir::YPos | RotateDir::ZPos)
    }

    /// The turn that undoes this one.
    pub fn inverse(self) -> Self {
        Self::new(self.axis(), !self.is_positive())
    }
}

/// Anything the collision oracle can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Translate(TranslateDir),
    Rotate(RotateDir),
}

impl From<TranslateDir> for Direction {
    fn from(value: TranslateDir) -> Self {
        Direction::Translate(value)
    }
}

impl From<RotateDir> for Direction {
    fn from(value: RotateDir) -> Self {
        Direction::Rotate(value)
    }
}

/// Player intents accepted by the action queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the piece one cell
    Translate(TranslateDir),
    /// Drop the piece as far as it goes and lock it
    HardDrop,
    /// Start an animated quarter turn
    Rotate(RotateDir),
}

impl Action {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris3d_types::{Action, TranslateDir};
    ///
    /// assert_eq!(Action::from_str("moveFront"), Some(Action::Translate(TranslateDir::Front)));
    /// assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
    /// assert_eq!(Action::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::Translate(TranslateDir::Left)),
            "moveright" => Some(Action::Translate(TranslateDir::Right)),
            "movedown" => Some(Action::Translate(TranslateDir::Down)),
            "movefront" => Some(Action::Translate(TranslateDir::Front)),
            "moveback" => Some(Action::Translate(TranslateDir::Back)),
            "harddrop" => Some(Action::HardDrop),
            "rotatexpos" => Some(Action::Rotate(RotateDir::XPos)),
            "rotatexneg" => Some(Action::Rotate(RotateDir::XNeg)),
            "rotateypos" => Some(Action::Rotate(RotateDir::YPos)),
            "rotateyneg" => Some(Action::Rotate(RotateDir::YNeg)),
            "rotatezpos" => Some(Action::Rotate(RotateDir::ZPos)),
            "rotatezneg" => Some(Action::Rotate(RotateDir::ZNeg)),
            _ => None,
        }
    }

    /// Convert to camelCase string (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Translate(TranslateDir::Left) => "moveLeft",
            Action::Translate(TranslateDir::Right) => "moveRight",
            Action::Translate(TranslateDir::Down) => "moveDown",
            Action::Translate(TranslateDir::Front) => "moveFront",
            Action::Translate(TranslateDir::Back) => "moveBack",
            Action::HardDrop => "hardDrop",
            Action::Rotate(RotateDir::XPos) => "rotateXPos",
            Action::Rotate(RotateDir::XNeg) => "rotateXNeg",
            Action::Rotate(RotateDir::YPos) => "rotateYPos",
            Action::Rotate(RotateDir::YNeg) => "rotateYNeg",
            Action::Rotate(RotateDir::ZPos) => "rotateZPos",
            Action::Rotate(RotateDir::ZNeg) => "rotateZNeg",
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, Action::Rotate(_))
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color of locked cubes.
pub const LOCKED_COLOR: Rgb = Rgb::new(128, 128, 128);

/// The ten piece kinds
///
/// The first seven are the planar tetrominoes. The `*Var` kinds are their
/// three-dimensional relatives that use the Z axis at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
    TVar,
    SVar,
    ZVar,
}

impl PieceKind {
    /// Planar kinds only.
    pub const CLASSIC: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Every kind.
    pub const ALL: [PieceKind; 10] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::TVar,
        PieceKind::SVar,
        PieceKind::ZVar,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "tvar" => Some(PieceKind::TVar),
            "svar" => Some(PieceKind::SVar),
            "zvar" => Some(PieceKind::ZVar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::TVar => "tvar",
            PieceKind::SVar => "svar",
            PieceKind::ZVar => "zvar",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::T => Rgb::new(255, 0, 255),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 128, 0),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::Z => Rgb::new(255, 0, 0),
            PieceKind::TVar => Rgb::new(128, 0, 128),
            PieceKind::SVar => Rgb::new(128, 128, 0),
            PieceKind::ZVar => Rgb::new(255, 105, 180),
        }
    }
}

/// Which kinds the spawner draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceSet {
    Classic,
    #[default]
    Extended,
}

impl PieceSet {
    pub fn kinds(self) -> &'static [PieceKind] {
        match self {
            PieceSet::Classic => &PieceKind::CLASSIC,
            PieceSet::Extended => &PieceKind::ALL,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(PieceSet::Classic),
            "extended" => Some(PieceSet::Extended),
            _ => None,
        }
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
    Won,
}

impl SessionStatus {
    /// A game has been started and has not ended.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Running | SessionStatus::Paused)
    }
}

/// Transient scoreboard messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Message {
    #[default]
    None,
    Single,
    Double,
    Triple,
    Tetris,
    GameOver,
    Win,
    Paused,
    Ended,
}

impl Message {
    /// Message announcing a simultaneous clear of `lines` rows.
    pub fn for_lines(lines: u32) -> Self {
        match lines {
            0 => Message::None,
            1 => Message::Single,
            2 => Message::Double,
            3 => Message::Triple,
            _ => Message::Tetris,
        }
    }

    /// Display text (empty for `None`)
    pub fn text(&self) -> &'static str {
        match self {
            Message::None => "",
            Message::Single => "Single!",
            Message::Double => "Double!",
            Message::Triple => "Triple!",
            Message::Tetris => "Tetris!",
            Message::GameOver => "Game over.",
            Message::Win => "You win!",
            Message::Paused => "Paused.",
            Message::Ended => "Game ended.",
        }
    }
}
