//! Cell contents as reported by the environment.
//!
//! The environment describes every cell with a single character. The
//! explorer only ever acts on three classes: walls block movement, the goal
//! ends the task, and everything else is passable. Item and transport codes
//! are kept verbatim in [`Cell::Feature`] so the map stays faithful to what
//! was observed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Cell {
    /// Impassable.
    Wall,
    /// The cell the explorer is trying to reach.
    Goal,
    /// Plain passable ground.
    #[default]
    Open,
    /// Any other passable content (items, stairs, numbered tiles).
    Feature(char),
}

impl Cell {
    /// Character the environment uses for walls.
    pub const WALL_MARKER: char = 'w';
    /// Character the environment uses for the goal.
    pub const GOAL_MARKER: char = 'r';
    /// Character the environment uses for plain ground.
    pub const OPEN_MARKER: char = 'g';

    /// Classify an environment character.
    pub const fn from_char(c: char) -> Self {
        match c {
            Self::WALL_MARKER => Self::Wall,
            Self::GOAL_MARKER => Self::Goal,
            Self::OPEN_MARKER => Self::Open,
            other => Self::Feature(other),
        }
    }

    /// The environment character for this cell.
    pub const fn as_char(self) -> char {
        match self {
            Self::Wall => Self::WALL_MARKER,
            Self::Goal => Self::GOAL_MARKER,
            Self::Open => Self::OPEN_MARKER,
            Self::Feature(c) => c,
        }
    }

    /// Whether the cell blocks movement.
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Whether the cell is the goal.
    pub const fn is_goal(self) -> bool {
        matches!(self, Self::Goal)
    }

    /// Parse a ray written as a string of environment characters, nearest
    /// cell first (e.g. `"ggw"`).
    pub fn ray(cells: &str) -> Vec<Self> {
        cells.chars().map(Self::from_char).collect()
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> Self {
        cell.as_char()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
