//! The environment the explorer runs against.
//!
//! The maze simulator is an external collaborator: it owns the true map,
//! renders percepts, and applies actions. This module only fixes the
//! interface the episode runner drives.

use delve_types::{Action, Percept};
use serde::Serialize;

/// Errors reported by an [`Environment`].
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The environment could not produce a percept.
    #[error("failed to observe environment: {message}")]
    Observe {
        /// Description of the failure.
        message: String,
    },

    /// The environment could not apply an action.
    #[error("failed to apply action {action}: {message}")]
    Apply {
        /// The rejected action.
        action: Action,
        /// Description of the failure.
        message: String,
    },
}

/// What happened when an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// The explorer moved one cell.
    Moved,
    /// The move ran into a wall; the explorer did not move.
    Bumped,
    /// `U` on the goal. The episode is over.
    Solved,
    /// `U` on a cell with nothing to use.
    Idle,
}

/// A maze the explorer can observe and act in.
pub trait Environment {
    /// What the explorer currently sees.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::Observe`] if no percept is available.
    fn percept(&self) -> Result<Percept, EnvironmentError>;

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::Apply`] if the environment cannot
    /// process the action at all. Running into a wall is not an error; it
    /// is reported as [`StepOutcome::Bumped`].
    fn apply(&mut self, action: Action) -> Result<StepOutcome, EnvironmentError>;
}
