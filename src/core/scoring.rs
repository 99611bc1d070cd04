//! Scoring and leveling rules.
//!
//! Line clears award a flat table per simultaneous clear count; soft and hard
//! drops award per-cell points. The level is derived from cumulative cleared
//! lines and drives the gravity interval down in fixed steps to a floor.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS,
    SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows in a single step.
/// Counts outside the table (0, or more than 4) award nothing.
pub fn line_clear_score(lines: u32) -> u32 {
    LINE_SCORES.get(lines as usize).copied().unwrap_or(0)
}

/// Points for a manual drop of `cells` rows
pub fn drop_score(cells: u32, hard: bool) -> u32 {
    if hard {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

/// Level for a cumulative cleared-line count
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}

/// Gravity interval for a level: max(100ms, 1000ms - level * 100ms)
pub fn drop_interval_ms(level: u32) -> u64 {
    BASE_DROP_MS
        .saturating_sub(u64::from(level) * DROP_STEP_MS)
        .max(MIN_DROP_MS)
}
