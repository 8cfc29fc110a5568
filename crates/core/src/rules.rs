//! Element interaction rules.
//!
//! Only vertical neighbours react:
//! - Fire and Water annihilate each other (either one may be the initiator)
//! - Dynamite destroys a Rock directly below it, otherwise it fizzles on whatever
//!   it rests on (including the floor)
//! - Rock never initiates

use crate::grid::Grid;
use crate::types::{
    ElementKind, GameEvent, Position, DYNAMITE_WASTED_SCORE, EXTINGUISH_SCORE, GRID_ROWS,
    ROCK_DESTROYED_SCORE,
};

/// Outcome kind of a single interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    Extinguish,
    RockDestroyed,
    DynamiteWasted,
}

impl Reaction {
    pub fn score(self) -> i64 {
        match self {
            Reaction::Extinguish => EXTINGUISH_SCORE,
            Reaction::RockDestroyed => ROCK_DESTROYED_SCORE,
            Reaction::DynamiteWasted => DYNAMITE_WASTED_SCORE,
        }
    }

    pub fn event(self) -> GameEvent {
        match self {
            Reaction::Extinguish => GameEvent::ElementExtinguished,
            Reaction::RockDestroyed => GameEvent::RockDestroyed,
            Reaction::DynamiteWasted => GameEvent::DynamiteWasted,
        }
    }
}

/// A reaction started by the cell at `initiator`.
///
/// The initiator is always removed; `partner` is the second removed cell, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub reaction: Reaction,
    pub initiator: Position,
    pub partner: Option<Position>,
}

impl Interaction {
    /// Cells removed by this interaction
    pub fn removed(&self) -> usize {
        1 + usize::from(self.partner.is_some())
    }
}

/// Evaluate the rule for the occupied cell at `pos` against `grid` as it stands.
///
/// A partner may be shared with another initiator in the same pass: the caller reads
/// the grid from the start of the pass and removes each cell once.
pub fn interaction_at(grid: &Grid, pos: Position) -> Option<Interaction> {
    let kind = grid.kind(pos.row, pos.col)?;
    match kind {
        ElementKind::Fire => annihilate(grid, pos, ElementKind::Water),
        ElementKind::Water => annihilate(grid, pos, ElementKind::Fire),
        ElementKind::Dynamite => detonate(grid, pos),
        ElementKind::Rock | ElementKind::None => None,
    }
}

fn annihilate(grid: &Grid, pos: Position, opposite: ElementKind) -> Option<Interaction> {
    // Above first, then below.
    [pos.row - 1, pos.row + 1]
        .into_iter()
        .map(|row| Position::new(row, pos.col))
        .find(|&n| grid.kind(n.row, n.col) == Some(opposite))
        .map(|partner| Interaction {
            reaction: Reaction::Extinguish,
            initiator: pos,
            partner: Some(partner),
        })
}

fn detonate(grid: &Grid, pos: Position) -> Option<Interaction> {
    let below = Position::new(pos.row + 1, pos.col);
    let wasted = Interaction {
        reaction: Reaction::DynamiteWasted,
        initiator: pos,
        partner: None,
    };

    if below.row >= GRID_ROWS as i8 {
        return Some(wasted);
    }

    match grid.kind(below.row, below.col)? {
        ElementKind::None => None,
        ElementKind::Rock => Some(Interaction {
            reaction: Reaction::RockDestroyed,
            initiator: pos,
            partner: Some(below),
        }),
        _ => Some(wasted),
    }
}
