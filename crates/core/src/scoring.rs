//! Scoring module - line-clear points, levels and fall speed
//!
//! A clear of `n` simultaneous rows is worth `1000 * 2^(n-1)`. The level is
//! derived from the score and only ever rises; climbing past the top level is
//! a win.

use crate::types::{FALL_INTERVALS, LINE_CLEAR_BASE_SCORE, MAX_LEVEL, MIN_LEVEL};

/// Points for clearing `lines` rows at once.
///
/// ```
/// use tetris3d_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(4), 8000);
/// ```
pub fn line_clear_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_CLEAR_BASE_SCORE.saturating_mul(1u32.checked_shl(lines - 1).unwrap_or(u32::MAX))
}

/// Level implied by `score`: `floor(score / level_jump_score) + 1`.
///
/// May exceed [`MAX_LEVEL`]; see [`is_win`].
pub fn level_for_score(score: u32, level_jump_score: u32) -> u32 {
    score / level_jump_score.max(1) + 1
}

/// Level after a score change.
///
/// Never drops below `current`, so a game started at a high level stays there
/// until the score catches up.
pub fn next_level(current: u32, score: u32, level_jump_score: u32) -> u32 {
    current.max(level_for_score(score, level_jump_score))
}

/// Whether `level` lies past the last playable level.
pub fn is_win(level: u32) -> bool {
    level > MAX_LEVEL
}

/// Fall interval for a level, in milliseconds.
///
/// Levels outside 1..=10 are clamped.
pub fn fall_interval_ms(level: u32) -> u32 {
    FALL_INTERVALS[level.clamp(MIN_LEVEL, MAX_LEVEL) as usize]
}
