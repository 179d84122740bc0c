//! Scoring module - line clear points, drop points and level progression
//!
//! - Clearing `n` rows in one lock awards `LINE_SCORES[n] * level`.
//! - Soft drop awards 1 point per row, hard drop 2 points per row.
//! - After a clear, once cumulative lines reach `level * 5`, the level goes up
//!   by one and gravity speeds up by 100ms (never below 100ms). At most one
//!   level-up happens per clear.

use crate::types::{
    FALL_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_ROW, INITIAL_FALL_INTERVAL_MS, INITIAL_LEVEL,
    LINES_PER_LEVEL, LINE_SCORES, MIN_FALL_INTERVAL_MS, SOFT_DROP_POINTS_PER_ROW,
};

/// Calculate line clear score
/// lines: number of lines cleared in one lock
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS_PER_ROW
    } else {
        SOFT_DROP_POINTS_PER_ROW
    };
    cells.saturating_mul(per_row)
}

/// Gravity interval after one level-up
pub fn next_fall_interval_ms(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(FALL_INTERVAL_STEP_MS)
        .max(MIN_FALL_INTERVAL_MS)
}

/// Result of feeding one clear pass into the progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub lines: u32,
    pub points: u32,
    pub leveled_up: bool,
}

/// Score, level, cleared lines and gravity speed of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    score: u32,
    level: u32,
    lines: u32,
    fall_interval_ms: u32,
}

impl Progression {
    /// Fresh session values
    pub fn new() -> Self {
        Self {
            score: 0,
            level: INITIAL_LEVEL,
            lines: 0,
            fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
        }
    }

    /// A progression already at `level` with `lines` cleared.
    ///
    /// The gravity interval is the one reached by climbing from level 1.
    pub fn at(level: u32, lines: u32) -> Self {
        let level = level.max(INITIAL_LEVEL);
        let fall_interval_ms =
            (INITIAL_LEVEL..level).fold(INITIAL_FALL_INTERVAL_MS, |ms, _| next_fall_interval_ms(ms));
        Self {
            score: 0,
            level,
            lines,
            fall_interval_ms,
        }
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

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Add drop points (or any other flat bonus) to the score
    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Apply the outcome of one clear pass that removed `lines` rows.
    ///
    /// Points use the level in effect before any level-up.
    pub fn apply_clear(&mut self, lines: u32) -> ClearResult {
        if lines == 0 {
            return ClearResult::default();
        }

        let points = calculate_line_score(lines as usize, self.level);
        self.add_points(points);
        self.lines = self.lines.saturating_add(lines);

        let leveled_up = self.lines >= self.level.saturating_mul(LINES_PER_LEVEL);
        if leveled_up {
            self.level += 1;
            self.fall_interval_ms = next_fall_interval_ms(self.fall_interval_ms);
        }

        ClearResult {
            lines,
            points,
            leveled_up,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
