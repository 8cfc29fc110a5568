//! Scoring module - line-clear points, leveling and the soft-drop speed curve
//!
//! Interaction points live with the rules ([`crate::rules::Reaction::score`]); this
//! module covers what depends on cleared rows:
//! - Rows cleared in one pass score `100 * rows * (combo + 1)`
//! - Level is `lines / 2 + 1`
//! - Soft-drop interval is `max(40, 400 - (level - 1) * 30)` ms

use crate::types::{BASE_TICK_MS, LINES_PER_LEVEL, LINE_CLEAR_BASE, MIN_TICK_MS, TICK_STEP_MS};

/// Points for `rows` rows cleared in a single pass at the given combo value
pub fn line_clear_score(rows: u32, combo: u32) -> i64 {
    LINE_CLEAR_BASE * i64::from(rows) * (i64::from(combo) + 1)
}

/// Level reached after `lines` total cleared rows (1-based)
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Soft-drop timer interval for a level
pub fn tick_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1).saturating_mul(TICK_STEP_MS);
    BASE_TICK_MS.saturating_sub(steps).max(MIN_TICK_MS)
}
