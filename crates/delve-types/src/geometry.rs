//! Compass directions and grid coordinates.
//!
//! The explorer reasons in its own coordinate frame: the origin is `(1, 1)`
//! and `y` grows southward. Only the four [`Cardinal`] directions are ever
//! used for movement. The full eight-way [`Direction`] set exists so the
//! pruning engine can classify diagonal neighbors.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight compass directions a percept ray can point in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up, `(0, -1)`.
    #[serde(rename = "N")]
    North,
    /// Right, `(1, 0)`.
    #[serde(rename = "E")]
    East,
    /// Down, `(0, 1)`.
    #[serde(rename = "S")]
    South,
    /// Left, `(-1, 0)`.
    #[serde(rename = "W")]
    West,
    /// Up and right, `(1, -1)`.
    #[serde(rename = "NE")]
    NorthEast,
    /// Up and left, `(-1, -1)`.
    #[serde(rename = "NW")]
    NorthWest,
    /// Down and right, `(1, 1)`.
    #[serde(rename = "SE")]
    SouthEast,
    /// Down and left, `(-1, 1)`.
    #[serde(rename = "SW")]
    SouthWest,
}

impl Direction {
    /// All eight directions, cardinals first in scan priority order.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Coordinate delta `(dx, dy)` of one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (-1, -1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (-1, 1),
        }
    }

    /// The cardinal this direction corresponds to, if it is one.
    pub const fn cardinal(self) -> Option<Cardinal> {
        match self {
            Self::North => Some(Cardinal::North),
            Self::East => Some(Cardinal::East),
            Self::South => Some(Cardinal::South),
            Self::West => Some(Cardinal::West),
            Self::NorthEast | Self::NorthWest | Self::SouthEast | Self::SouthWest => None,
        }
    }

    /// Short compass label (`"N"`, `"NE"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
            Self::NorthEast => "NE",
            Self::NorthWest => "NW",
            Self::SouthEast => "SE",
            Self::SouthWest => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cardinal
// ---------------------------------------------------------------------------

/// A movement direction. The declaration order is the scan priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    /// Up.
    #[serde(rename = "N")]
    North,
    /// Right.
    #[serde(rename = "E")]
    East,
    /// Down.
    #[serde(rename = "S")]
    South,
    /// Left.
    #[serde(rename = "W")]
    West,
}

impl Cardinal {
    /// The four cardinals in scan priority order: N, E, S, W.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction that undoes a step in this direction.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// This cardinal as a general [`Direction`].
    pub const fn direction(self) -> Direction {
        match self {
            Self::North => Direction::North,
            Self::East => Direction::East,
            Self::South => Direction::South,
            Self::West => Direction::West,
        }
    }

    /// Coordinate delta `(dx, dy)` of one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        self.direction().delta()
    }

    /// Single-letter token used on the wire (`'N'`, `'E'`, `'S'`, `'W'`).
    pub const fn token(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parse a single-letter token.
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl From<Cardinal> for Direction {
    fn from(cardinal: Cardinal) -> Self {
        cardinal.direction()
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.direction().fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A grid coordinate in the explorer's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing eastward.
    pub x: i32,
    /// Row, growing southward.
    pub y: i32,
}

impl Position {
    /// Where every exploration session begins.
    pub const ORIGIN: Self = Self { x: 1, y: 1 };

    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// The coordinate one cardinal step away.
    pub const fn neighbor(self, cardinal: Cardinal) -> Self {
        self.step(cardinal.direction())
    }

    /// The cardinal leading from `self` to an orthogonally adjacent `other`.
    pub fn cardinal_to(self, other: Self) -> Option<Cardinal> {
        Cardinal::ALL
            .into_iter()
            .find(|&cardinal| self.neighbor(cardinal) == other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for cardinal in Cardinal::ALL {
            assert_eq!(cardinal.opposite().opposite(), cardinal);
            assert_ne!(cardinal.opposite(), cardinal);
        }
    }

    #[test]
    fn opposite_deltas_cancel() {
        for cardinal in Cardinal::ALL {
            let (dx, dy) = cardinal.delta();
            let (ox, oy) = cardinal.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn north_is_negative_y() {
        let p = Position::ORIGIN.neighbor(Cardinal::North);
        assert_eq!(p, Position::new(1, 0));
        let p = Position::ORIGIN.step(Direction::SouthWest);
        assert_eq!(p, Position::new(0, 2));
    }

    #[test]
    fn cardinal_subset_matches() {
        let cardinals: Vec<Cardinal> = Direction::ALL
            .into_iter()
            .filter_map(Direction::cardinal)
            .collect();
        assert_eq!(cardinals, Cardinal::ALL.to_vec());
    }

    #[test]
    fn cardinal_to_finds_adjacent_only() {
        let here = Position::new(3, 3);
        assert_eq!(here.cardinal_to(Position::new(3, 2)), Some(Cardinal::North));
        assert_eq!(here.cardinal_to(Position::new(2, 3)), Some(Cardinal::West));
        assert_eq!(here.cardinal_to(Position::new(4, 4)), None);
        assert_eq!(here.cardinal_to(here), None);
    }

    #[test]
    fn tokens_round_trip() {
        for cardinal in Cardinal::ALL {
            assert_eq!(Cardinal::from_token(cardinal.token()), Some(cardinal));
        }
        assert_eq!(Cardinal::from_token('U'), None);
    }

    #[test]
    fn direction_serializes_as_compass_label() {
        let json = serde_json::to_string(&Direction::NorthEast).unwrap_or_default();
        assert_eq!(json, "\"NE\"");
    }
}
