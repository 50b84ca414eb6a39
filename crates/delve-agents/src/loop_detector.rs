//! Cycle recognition at dead ends.
//!
//! When the explorer is stuck, the cell it needs to return to may be one
//! step away across a closed loop rather than many steps back along the
//! move stack. The detector looks for that situation and, if found, tells
//! the explorer which direction to step and how many stack frames the jump
//! makes obsolete.
//!
//! For every unblocked cardinal at the dead end, the detector finds the
//! latest run-history entry departing from that neighbor and walks forward
//! from it to the dead end. The walk is accepted as a loop only if:
//!
//! - no move is immediately undone by the next one;
//! - every cell after the start has no remaining unexplored branch;
//! - every recorded step on it was a forward or goal-approach move, so the
//!   frames it pushed are still on top of the stack;
//! - the moves cover all four cardinals and there is more than one of them;
//! - stepping from the dead end in the candidate direction lands back on
//!   the start;
//! - the frames to discard do not exceed the stack depth.
//!
//! Among accepted candidates the one discarding the most frames wins, ties
//! going to the earlier direction in N, E, S, W order.

use std::collections::BTreeSet;

use delve_types::{Cardinal, Percept, Position};
use delve_world::WorldMap;
use serde::Serialize;
use tracing::trace;

use crate::history::{RunHistory, RunStep, StepKind};

/// A shortcut out of a dead end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortcut {
    /// Direction to step.
    pub direction: Cardinal,
    /// Move stack frames made obsolete by the jump.
    pub discard: usize,
}

/// The dead-end entry that has not been added to the history yet. Its
/// reverse direction depends on which candidate is being tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStep {
    /// The dead-end cell.
    pub position: Position,
    /// Unblocked cardinal neighbors of the dead-end cell.
    pub open_degree: u8,
}

impl PendingStep {
    fn resolve(self, direction: Cardinal) -> RunStep {
        RunStep {
            position: self.position,
            reverse: direction.opposite(),
            open_degree: self.open_degree,
            kind: StepKind::Shortcut,
        }
    }
}

/// Look for a loop shortcut out of the dead end described by `pending`.
pub fn find_shortcut(
    world: &WorldMap,
    history: &RunHistory,
    pending: PendingStep,
    percept: &Percept,
    stack_depth: usize,
) -> Option<Shortcut> {
    let mut best: Option<Shortcut> = None;
    for direction in Cardinal::ALL {
        if percept.is_blocked(direction) {
            continue;
        }
        let Some(discard) = closing_span(world, history, pending, direction) else {
            continue;
        };
        if discard > stack_depth {
            trace!(%direction, discard, stack_depth, "loop deeper than move stack");
            continue;
        }
        if best.is_none_or(|b| discard > b.discard) {
            best = Some(Shortcut { direction, discard });
        }
    }
    best
}

/// Frames discarded if `direction` closes a loop, or `None`.
fn closing_span(
    world: &WorldMap,
    history: &RunHistory,
    pending: PendingStep,
    direction: Cardinal,
) -> Option<usize> {
    let target = pending.position.neighbor(direction);
    let start = history.last_departure_from(target)?;
    let recorded = history.steps().get(start..)?;
    let total = history.len().saturating_add(1);
    let span = total.checked_sub(start)?;

    let closing = pending.resolve(direction);
    let mut covered = BTreeSet::new();
    let mut previous: Option<Cardinal> = None;
    let mut endpoint = target;
    let mut length: usize = 0;

    for (offset, step) in recorded.iter().chain(std::iter::once(&closing)).enumerate() {
        let is_closing = offset == recorded.len();
        if !is_closing && !step.kind.owns_frame() {
            return None;
        }
        if previous.is_some_and(|p| p.opposite() == step.reverse) {
            return None;
        }
        if offset > 0 && step.remaining_degree(world) > 0 {
            return None;
        }
        covered.insert(step.reverse);
        previous = Some(step.reverse);
        endpoint = step.position;
        length = length.saturating_add(1);
    }

    let closes = endpoint.neighbor(direction) == target;
    if covered.len() < Cardinal::ALL.len() || length <= 1 || !closes {
        return None;
    }
    span.checked_sub(1)
}
