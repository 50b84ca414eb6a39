//! Movement bookkeeping: the backtrack stack and the run history.
//!
//! Two records are kept side by side and they answer different questions:
//!
//! - **[`MoveStack`]** -- one reverse direction per forward step still open.
//!   Popping it walks the explorer back toward the origin. Backtracks pop
//!   one frame; loop shortcuts discard several at once.
//! - **[`RunHistory`]** -- one [`RunStep`] per physical move, never
//!   truncated. The loop detector reads it to recognize when the path has
//!   closed on itself.

use delve_types::{Cardinal, Position};
use delve_world::WorldMap;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Move stack
// ---------------------------------------------------------------------------

/// LIFO of reverse directions, one per unreturned forward step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveStack {
    /// Bottom (first step from the origin) to top.
    frames: Vec<Cardinal>,
}

impl MoveStack {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Record the way back from a forward step.
    pub fn push(&mut self, reverse: Cardinal) {
        self.frames.push(reverse);
    }

    /// Take the most recent way back.
    pub fn pop(&mut self) -> Option<Cardinal> {
        self.frames.pop()
    }

    /// Drop up to `count` frames from the top. Returns how many were
    /// actually removed.
    pub fn discard(&mut self, count: usize) -> usize {
        let keep = self.frames.len().saturating_sub(count);
        let removed = self.frames.len().saturating_sub(keep);
        self.frames.truncate(keep);
        removed
    }

    /// Number of open frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the explorer is back at its starting branch.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from bottom to top.
    pub fn as_slice(&self) -> &[Cardinal] {
        &self.frames
    }
}

// ---------------------------------------------------------------------------
// Run history
// ---------------------------------------------------------------------------

/// What kind of move produced a [`RunStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    /// Step onto an untraversed cell.
    Forward,
    /// Step toward a visible goal.
    GoalApproach,
    /// Single-frame return along the move stack.
    Backtrack,
    /// Jump across a closed loop.
    Shortcut,
}

impl StepKind {
    /// Whether this step pushed a frame onto the move stack.
    pub const fn owns_frame(self) -> bool {
        matches!(self, Self::Forward | Self::GoalApproach)
    }
}

/// One physical move, recorded from the cell it departed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStep {
    /// Where the explorer stood before moving.
    pub position: Position,
    /// The direction that undoes the move.
    pub reverse: Cardinal,
    /// Unblocked cardinal neighbors seen from `position` at the time.
    pub open_degree: u8,
    /// How the move was chosen.
    pub kind: StepKind,
}

impl RunStep {
    /// Branches of this cell not yet accounted for: its open degree minus
    /// the cardinal neighbors now committed.
    pub fn remaining_degree(&self, world: &WorldMap) -> u8 {
        self.open_degree
            .saturating_sub(world.traversed_open_neighbors(self.position))
    }
}

/// Append-only record of every move the explorer made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunHistory {
    steps: Vec<RunStep>,
}

impl RunHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn push(&mut self, step: RunStep) {
        self.steps.push(step);
    }

    /// Every step, oldest first.
    pub fn steps(&self) -> &[RunStep] {
        &self.steps
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no move has been made.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the latest step that departed from `position`.
    pub fn last_departure_from(&self, position: Position) -> Option<usize> {
        self.steps.iter().rposition(|step| step.position == position)
    }

    /// Remaining degree of every step against the current map.
    pub fn remaining_degrees(&self, world: &WorldMap) -> Vec<u8> {
        self.steps
            .iter()
            .map(|step| step.remaining_degree(world))
            .collect()
    }
}
