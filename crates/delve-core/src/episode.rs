//! Drives a [`DecisionSource`] against an [`Environment`].
//!
//! One turn is: read a percept, ask for an action, apply it. The episode
//! ends successfully when `U` is applied on the goal, and fails when the
//! turn budget runs out or either side reports an error.

use delve_types::Action;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::decision::{DecisionError, DecisionSource};
use crate::environment::{Environment, EnvironmentError, StepOutcome};

/// Errors that end an episode early.
#[derive(Debug, thiserror::Error)]
pub enum EpisodeError {
    /// The decision source failed.
    #[error("decision failed on turn {turn}: {source}")]
    Decision {
        /// Turn on which the failure happened.
        turn: u64,
        /// The underlying error.
        source: DecisionError,
    },

    /// The environment failed.
    #[error("environment failed on turn {turn}: {source}")]
    Environment {
        /// Turn on which the failure happened.
        turn: u64,
        /// The underlying error.
        source: EnvironmentError,
    },

    /// The goal was not reached within the turn budget.
    #[error("goal not reached within {max_turns} turns")]
    TurnBudgetExhausted {
        /// The budget that ran out.
        max_turns: u64,
    },
}

/// Record of a solved episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    /// Turns played, including the final `U`.
    pub turns: u64,
    /// Moves that ran into a wall.
    pub bumps: u64,
    /// Every action, in order.
    pub actions: Vec<Action>,
}

impl EpisodeSummary {
    /// The action sequence as a token string, e.g. `"EEEU"`.
    pub fn tokens(&self) -> String {
        self.actions.iter().copied().map(Action::token).collect()
    }
}

/// Play turns until the goal is used or `max_turns` have been played.
///
/// # Errors
///
/// Returns [`EpisodeError::TurnBudgetExhausted`] if the goal is not reached
/// in time, or the wrapped error if either collaborator fails.
pub fn run_episode<D, E>(
    source: &mut D,
    environment: &mut E,
    max_turns: u64,
) -> Result<EpisodeSummary, EpisodeError>
where
    D: DecisionSource + ?Sized,
    E: Environment + ?Sized,
{
    let mut summary = EpisodeSummary {
        turns: 0,
        bumps: 0,
        actions: Vec::new(),
    };

    for turn in 1..=max_turns {
        let percept = environment
            .percept()
            .map_err(|source| EpisodeError::Environment { turn, source })?;
        let action = source
            .next_action(&percept)
            .map_err(|source| EpisodeError::Decision { turn, source })?;
        let outcome = environment
            .apply(action)
            .map_err(|source| EpisodeError::Environment { turn, source })?;

        summary.turns = turn;
        summary.actions.push(action);
        debug!(turn, %action, ?outcome, "turn played");

        match outcome {
            StepOutcome::Solved => {
                info!(turns = turn, bumps = summary.bumps, "episode solved");
                return Ok(summary);
            }
            StepOutcome::Bumped => {
                summary.bumps = summary.bumps.saturating_add(1);
                warn!(turn, %action, "move ran into a wall");
            }
            StepOutcome::Moved | StepOutcome::Idle => {}
        }
    }

    warn!(max_turns, "turn budget exhausted");
    Err(EpisodeError::TurnBudgetExhausted { max_turns })
}
