//! The action token the explorer hands back to the environment.
//!
//! Exactly one action is returned per turn: a cardinal move, or `U` to use
//! the contents of the current cell. On the wire each action is a single
//! character (`N`, `E`, `S`, `W`, `U`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Cardinal;

/// Errors produced when parsing an action token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    /// The character is not one of `N`, `E`, `S`, `W`, `U`.
    #[error("unknown action token: {0:?}")]
    UnknownToken(char),
}

/// One atomic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Action {
    /// Step one cell in a cardinal direction.
    Move(Cardinal),
    /// Use the contents of the current cell. Returned at the goal.
    Use,
}

impl Action {
    /// Token for the use action.
    pub const USE_TOKEN: char = 'U';

    /// Single-character wire token.
    pub const fn token(self) -> char {
        match self {
            Self::Move(cardinal) => cardinal.token(),
            Self::Use => Self::USE_TOKEN,
        }
    }
}

impl From<Cardinal> for Action {
    fn from(cardinal: Cardinal) -> Self {
        Self::Move(cardinal)
    }
}

impl TryFrom<char> for Action {
    type Error = ActionParseError;

    fn try_from(token: char) -> Result<Self, Self::Error> {
        if token == Self::USE_TOKEN {
            return Ok(Self::Use);
        }
        Cardinal::from_token(token)
            .map(Self::Move)
            .ok_or(ActionParseError::UnknownToken(token))
    }
}

impl From<Action> for char {
    fn from(action: Action) -> Self {
        action.token()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(Action::Move(Cardinal::West).to_string(), "W");
        assert_eq!(Action::Use.to_string(), "U");
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert_eq!(Action::try_from('U'), Ok(Action::Use));
        assert_eq!(Action::try_from('S'), Ok(Action::Move(Cardinal::South)));
        assert_eq!(Action::try_from('x'), Err(ActionParseError::UnknownToken('x')));
    }

    #[test]
    fn serde_uses_tokens() {
        let json = serde_json::to_string(&Action::Move(Cardinal::East)).unwrap_or_default();
        assert_eq!(json, "\"E\"");
        assert!(serde_json::from_str::<Action>("\"Q\"").is_err());
    }
}
