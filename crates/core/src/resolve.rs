//! Resolve pipeline - runs a freshly locked board to a stable configuration.
//!
//! Each pass, in order:
//! 1. Interaction scan over the active cells
//! 2. Apply removals
//! 3. Clear same-kind full rows
//! 4. Gravity, column by column
//!
//! The loop ends on the first pass that changes nothing. [`resolve`] is pure: it takes
//! the grid by value and reports everything that happened in a [`Resolution`].

use arrayvec::ArrayVec;
use tracing::{trace, warn};

use crate::grid::Grid;
use crate::rules::interaction_at;
use crate::scoring::line_clear_score;
use crate::types::{GameEvent, Position, GRID_COLS, GRID_ROWS, MAX_RESOLVE_PASSES};

const COLS: usize = GRID_COLS as usize;
const ROWS: usize = GRID_ROWS as usize;
const GRID_SIZE: usize = COLS * ROWS;

/// Cell positions, bounded by the grid size
pub type CellList = ArrayVec<Position, GRID_SIZE>;

/// Per-cell flags travelling with the grid contents
type Flags = [bool; GRID_SIZE];

#[inline(always)]
fn flag_index(pos: Position) -> usize {
    pos.row as usize * COLS + pos.col as usize
}

/// Result of one resolve cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Stable grid after the cycle
    pub grid: Grid,
    /// Net score change (Dynamite penalties can make it negative)
    pub score_delta: i64,
    pub lines_cleared: u32,
    /// Passes run, including the final one that changed nothing
    pub passes: u32,
    /// Final combo value (passes with an interaction removal)
    pub combo: u32,
    pub removed_by_reactions: u32,
    pub removed_by_lines: u32,
    /// Feedback events in the order they happened
    pub events: Vec<GameEvent>,
}

impl Resolution {
    fn empty(grid: Grid) -> Self {
        Self {
            grid,
            score_delta: 0,
            lines_cleared: 0,
            passes: 0,
            combo: 0,
            removed_by_reactions: 0,
            removed_by_lines: 0,
            events: Vec::new(),
        }
    }
}

/// Resolve `grid` starting from the `active` cells (normally the cells just merged).
///
/// Only cells that moved under gravity are re-examined on later passes. A reactive
/// pair can therefore be missed when the non-reactive side is the one that moved next
/// to a stationary reactive cell (e.g. Rock landing under an old Dynamite). This keeps
/// the behaviour players already know; widening the scan would change outcomes.
pub fn resolve(mut grid: Grid, active: &[Position]) -> Resolution {
    let mut active: CellList = active
        .iter()
        .copied()
        .filter(|p| Grid::in_bounds(p.row, p.col))
        .collect();
    let mut exhausted: Flags = [false; GRID_SIZE];

    let mut out = Resolution::empty(grid);

    loop {
        if out.passes >= MAX_RESOLVE_PASSES {
            warn!(passes = out.passes, "resolve did not settle, stopping");
            break;
        }
        out.passes += 1;
        let mut changed = false;

        // 1. Interactions.
        let removals = scan_interactions(&grid, &active, &mut exhausted, &mut out);

        // 2. Removals.
        let had_removals = !removals.is_empty();
        for &pos in &removals {
            grid.clear(pos.row, pos.col);
            exhausted[flag_index(pos)] = false;
        }
        if had_removals {
            changed = true;
            out.combo += 1;
            out.removed_by_reactions += removals.len() as u32;
        }

        // 3. Line clears.
        let rows = clear_uniform_rows(&mut grid, &mut exhausted);
        if rows > 0 {
            changed = true;
            out.lines_cleared += rows;
            out.removed_by_lines += rows * COLS as u32;
            out.score_delta += line_clear_score(rows, out.combo);
            out.events.push(GameEvent::RowsCleared {
                count: rows as u8,
                combo: out.combo,
            });
        }

        // 4. Gravity.
        active = apply_gravity(&mut grid, &mut exhausted);
        if !active.is_empty() {
            changed = true;
        }

        trace!(
            pass = out.passes,
            removed = removals.len(),
            rows,
            moved = active.len(),
            combo = out.combo,
            "resolve pass"
        );

        if !changed {
            break;
        }
    }

    debug_assert!(grid.is_consistent());
    out.grid = grid;
    out
}

/// Run the interaction rules for every eligible active cell.
///
/// Every rule reads `grid` as it stood at the start of the pass, so two initiators may
/// share a partner. Each cell is removed once; a cell already marked for removal does
/// not initiate again, so a pair seen from both sides scores once.
/// Returns the cells to remove; scores and events are recorded on `out`.
fn scan_interactions(
    grid: &Grid,
    active: &[Position],
    exhausted: &mut Flags,
    out: &mut Resolution,
) -> CellList {
    let mut marked: Flags = [false; GRID_SIZE];
    let mut removals = CellList::new();

    for &pos in active {
        let idx = flag_index(pos);
        if !grid.is_occupied(pos.row, pos.col) || exhausted[idx] || marked[idx] {
            continue;
        }

        let Some(hit) = interaction_at(grid, pos) else {
            continue;
        };

        mark_removal(&mut marked, &mut removals, pos);
        if let Some(partner) = hit.partner {
            mark_removal(&mut marked, &mut removals, partner);
            exhausted[idx] = true;
        }

        out.score_delta += hit.reaction.score();
        out.events.push(hit.reaction.event());
    }

    removals
}

fn mark_removal(marked: &mut Flags, removals: &mut CellList, pos: Position) {
    let idx = flag_index(pos);
    if !marked[idx] {
        marked[idx] = true;
        removals.push(pos);
    }
}

/// Empty every row that is full of a single element kind
fn clear_uniform_rows(grid: &mut Grid, exhausted: &mut Flags) -> u32 {
    let mut rows = 0;
    for row in 0..GRID_ROWS as i8 {
        if grid.is_row_clearable(row) {
            grid.clear_row(row);
            let start = row as usize * COLS;
            exhausted[start..start + COLS].fill(false);
            rows += 1;
        }
    }
    rows
}

/// Compact every column toward the floor.
///
/// Each empty slot, scanning bottom-up, takes the nearest occupied cell above it, so
/// a column fully settles in one call. Returns the destinations of the moved cells.
pub fn apply_gravity_to(grid: &mut Grid) -> CellList {
    let mut scratch: Flags = [false; GRID_SIZE];
    apply_gravity(grid, &mut scratch)
}

fn apply_gravity(grid: &mut Grid, exhausted: &mut Flags) -> CellList {
    let mut moved = CellList::new();

    for col in 0..GRID_COLS as i8 {
        let mut write = GRID_ROWS as i8 - 1;
        for read in (0..GRID_ROWS as i8).rev() {
            let Some(cell) = grid.get(read, col) else {
                continue;
            };
            if !cell.is_occupied() {
                continue;
            }
            if read != write {
                let from = Position::new(read, col);
                let to = Position::new(write, col);
                grid.set(to.row, to.col, cell);
                grid.clear(from.row, from.col);
                exhausted[flag_index(to)] = exhausted[flag_index(from)];
                exhausted[flag_index(from)] = false;
                moved.push(to);
            }
            write -= 1;
        }
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementKind;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_stable_board_takes_one_pass() {
        let g = grid(&["R.........", "F........."]);
        let res = resolve(g, &[Position::new(12, 0)]);
        assert_eq!(res.passes, 1);
        assert_eq!(res.grid, g);
        assert_eq!(res.score_delta, 0);
        assert!(res.events.is_empty());
    }

    #[test]
    fn test_gravity_compacts_column_in_one_call() {
        let mut g = Grid::new();
        g.set(2, 3, crate::grid::Cell::new(ElementKind::Rock));
        g.set(7, 3, crate::grid::Cell::new(ElementKind::Fire));
        g.set(11, 3, crate::grid::Cell::new(ElementKind::Water));

        let moved = apply_gravity_to(&mut g);
        assert_eq!(
            moved.as_slice(),
            &[
                Position::new(13, 3),
                Position::new(12, 3),
                Position::new(11, 3)
            ]
        );
        assert_eq!(g.kind(13, 3), Some(ElementKind::Water));
        assert_eq!(g.kind(12, 3), Some(ElementKind::Fire));
        assert_eq!(g.kind(11, 3), Some(ElementKind::Rock));
    }

    #[test]
    fn test_pair_seen_from_both_sides_scores_once() {
        let g = grid(&["F.........", "W........."]);
        let res = resolve(g, &[Position::new(12, 0), Position::new(13, 0)]);
        assert_eq!(res.score_delta, 20);
        assert_eq!(res.events, vec![GameEvent::ElementExtinguished]);
        assert_eq!(res.grid.occupied_count(), 0);
    }

    #[test]
    fn test_two_fires_share_one_water() {
        // F / W / F with both fires active: each fire sees the water at the start of
        // the pass, so all three cells go and each fire scores.
        let g = grid(&["F.........", "W.........", "F........."]);
        let res = resolve(g, &[Position::new(11, 0), Position::new(13, 0)]);
        assert_eq!(res.removed_by_reactions, 3);
        assert_eq!(res.grid.occupied_count(), 0);
        assert_eq!(
            res.events,
            vec![GameEvent::ElementExtinguished, GameEvent::ElementExtinguished]
        );
        assert_eq!(res.score_delta, 40);
        assert_eq!(res.combo, 1);
    }

    #[test]
    fn test_single_active_fire_takes_one_water() {
        let g = grid(&["W.........", "F.........", "W........."]);
        let res = resolve(g, &[Position::new(12, 0)]);
        assert_eq!(res.removed_by_reactions, 2);
        assert_eq!(res.grid.occupied_count(), 1);
        assert_eq!(res.grid.kind(13, 0), Some(ElementKind::Water));
    }

    #[test]
    fn test_exhaustion_moves_with_cell() {
        let mut g = Grid::new();
        g.set(10, 0, crate::grid::Cell::new(ElementKind::Fire));
        g.set(13, 0, crate::grid::Cell::new(ElementKind::Water));
        let mut exhausted: Flags = [false; GRID_SIZE];
        exhausted[flag_index(Position::new(10, 0))] = true;

        let moved = apply_gravity(&mut g, &mut exhausted);
        assert_eq!(moved.as_slice(), &[Position::new(12, 0)]);
        assert!(exhausted[flag_index(Position::new(12, 0))]);
        assert!(!exhausted[flag_index(Position::new(10, 0))]);

        // The exhausted Fire now rests on Water but may not react again.
        let mut out = Resolution::empty(g);
        let removals = scan_interactions(&g, &moved, &mut exhausted, &mut out);
        assert!(removals.is_empty());
        assert!(out.events.is_empty());

        // Without the flag the same scan reacts.
        let mut fresh: Flags = [false; GRID_SIZE];
        let removals = scan_interactions(&g, &moved, &mut fresh, &mut out);
        assert_eq!(removals.len(), 2);
        assert!(fresh[flag_index(Position::new(12, 0))]);
    }

    #[test]
    fn test_cascade_after_gravity() {
        // Dynamite lands on Rock; the Fire resting on top of the Dynamite falls onto Water.
        let g = grid(&[
            "F.........",
            "D.........",
            "R.........",
            "W.........",
        ]);
        let res = resolve(g, &[Position::new(11, 0)]);
        assert_eq!(
            res.events,
            vec![GameEvent::RockDestroyed, GameEvent::ElementExtinguished]
        );
        assert_eq!(res.score_delta, 70);
        assert_eq!(res.combo, 2);
        assert_eq!(res.grid.occupied_count(), 0);
    }

    #[test]
    fn test_line_clear_after_reaction_uses_reaction_combo() {
        // Pass 1: Dynamite has nothing below; both cells fall one row.
        // Pass 2: Dynamite on the floor is wasted (combo 1); Rock falls into the gap.
        // Pass 3: the bottom row is all Rock and clears at combo 1.
        let g = grid(&[".........R", ".........D", "RRRRRRRRR."]);
        let res = resolve(g, &[Position::new(12, 9)]);
        assert_eq!(
            res.events,
            vec![
                GameEvent::DynamiteWasted,
                GameEvent::RowsCleared { count: 1, combo: 1 }
            ]
        );
        assert_eq!(res.score_delta, -10 + 200);
        assert_eq!(res.lines_cleared, 1);
        // Line clears never advance the combo.
        assert_eq!(res.combo, 1);
        assert_eq!(res.passes, 4);
        assert_eq!(res.grid.occupied_count(), 0);
    }

    #[test]
    fn test_dynamite_wasted_on_water() {
        let g = grid(&[".........R", ".........D", "RRRRRRRRRW"]);
        let res = resolve(g, &[Position::new(12, 9)]);
        // Moved Rock has nothing to react with and the bottom row is mixed.
        assert_eq!(res.score_delta, -10);
        assert_eq!(res.lines_cleared, 0);
        assert_eq!(res.passes, 2);
        assert_eq!(res.grid.kind(12, 9), Some(ElementKind::Rock));
    }

    #[test]
    fn test_dynamite_on_rock_and_on_floor() {
        let g = grid(&["D.........", "R........D"]);
        let res = resolve(g, &[Position::new(12, 0), Position::new(13, 9)]);
        assert_eq!(
            res.events,
            vec![GameEvent::RockDestroyed, GameEvent::DynamiteWasted]
        );
        assert_eq!(res.score_delta, 40);
        assert_eq!(res.combo, 1);
        assert_eq!(res.grid.occupied_count(), 0);
    }

    #[test]
    fn test_mixed_full_row_never_clears() {
        let g = grid(&["RRRRRRRRRF"]);
        let res = resolve(g, &[Position::new(13, 9)]);
        assert_eq!(res.lines_cleared, 0);
        assert_eq!(res.grid, g);
    }

    #[test]
    fn test_row_clear_then_shift() {
        let g = grid(&["F.........", "RRRRRRRRRR"]);
        let res = resolve(g, &[Position::new(13, 0)]);
        assert_eq!(res.lines_cleared, 1);
        assert_eq!(res.score_delta, 100);
        assert_eq!(res.combo, 0);
        assert_eq!(res.removed_by_lines, 10);
        assert_eq!(res.grid.kind(13, 0), Some(ElementKind::Fire));
        assert_eq!(
            res.events,
            vec![GameEvent::RowsCleared { count: 1, combo: 0 }]
        );
    }
}
