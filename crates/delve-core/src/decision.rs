//! Decision source trait and scripted implementation.
//!
//! The episode runner presents a [`Percept`] each turn and awaits an
//! [`Action`] in response. The [`DecisionSource`] trait abstracts the
//! mechanism by which actions are obtained -- the [`Explorer`], a scripted
//! sequence for tests, or anything else that can answer a percept.

use std::collections::VecDeque;

use delve_agents::Explorer;
use delve_types::{Action, ActionParseError, Percept};

/// Errors that can occur while choosing an action.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// A scripted source has no actions left.
    #[error("decision script exhausted after {played} actions")]
    Exhausted {
        /// Actions played before running out.
        played: usize,
    },
}

/// A source of actions.
pub trait DecisionSource {
    /// Choose the action for this turn.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if no action can be produced.
    fn next_action(&mut self, percept: &Percept) -> Result<Action, DecisionError>;
}

impl DecisionSource for Explorer {
    fn next_action(&mut self, percept: &Percept) -> Result<Action, DecisionError> {
        Ok(self.decide(percept).action)
    }
}

/// Plays back a fixed list of actions, ignoring percepts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionSource {
    actions: VecDeque<Action>,
    played: usize,
}

impl ScriptedDecisionSource {
    /// Create a source that plays `actions` in order.
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            played: 0,
        }
    }

    /// Parse a script of action tokens such as `"EESU"`. Whitespace is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ActionParseError`] on the first unknown token.
    pub fn from_tokens(script: &str) -> Result<Self, ActionParseError> {
        let actions = script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Action::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(actions))
    }

    /// Actions not yet played.
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl DecisionSource for ScriptedDecisionSource {
    fn next_action(&mut self, _percept: &Percept) -> Result<Action, DecisionError> {
        let action = self
            .actions
            .pop_front()
            .ok_or(DecisionError::Exhausted {
                played: self.played,
            })?;
        self.played = self.played.saturating_add(1);
        Ok(action)
    }
}
