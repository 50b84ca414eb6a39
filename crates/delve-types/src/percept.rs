//! Percept payload delivered to the explorer each turn.
//!
//! The percept is the **only** information the explorer receives about the
//! maze. Each ray lists what is visible along one compass direction,
//! starting with the adjacent cell and moving outward. Rays stop wherever
//! the environment's line of sight stops, so they may be short or empty.
//!
//! The serde layout matches the environment's native keys: `X` for the
//! current cell and `N`, `NE`, `E`, `SE`, `S`, `SW`, `W`, `NW` for the rays.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::geometry::{Cardinal, Direction};

/// One turn's worth of observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    /// Contents of the cell the explorer is standing on.
    #[serde(rename = "X", deserialize_with = "here_cell")]
    pub here: Cell,
    /// Ray to the north.
    #[serde(rename = "N", default)]
    pub north: Vec<Cell>,
    /// Ray to the north-east.
    #[serde(rename = "NE", default)]
    pub north_east: Vec<Cell>,
    /// Ray to the east.
    #[serde(rename = "E", default)]
    pub east: Vec<Cell>,
    /// Ray to the south-east.
    #[serde(rename = "SE", default)]
    pub south_east: Vec<Cell>,
    /// Ray to the south.
    #[serde(rename = "S", default)]
    pub south: Vec<Cell>,
    /// Ray to the south-west.
    #[serde(rename = "SW", default)]
    pub south_west: Vec<Cell>,
    /// Ray to the west.
    #[serde(rename = "W", default)]
    pub west: Vec<Cell>,
    /// Ray to the north-west.
    #[serde(rename = "NW", default)]
    pub north_west: Vec<Cell>,
}

impl Percept {
    /// A percept standing on `here` with every ray empty.
    pub fn new(here: Cell) -> Self {
        Self {
            here,
            ..Self::default()
        }
    }

    /// Builder-style setter for one ray.
    #[must_use]
    pub fn with_ray(mut self, direction: Direction, ray: Vec<Cell>) -> Self {
        *self.ray_mut(direction) = ray;
        self
    }

    /// The cells visible along `direction`, nearest first.
    pub fn ray(&self, direction: Direction) -> &[Cell] {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
            Direction::NorthEast => &self.north_east,
            Direction::NorthWest => &self.north_west,
            Direction::SouthEast => &self.south_east,
            Direction::SouthWest => &self.south_west,
        }
    }

    fn ray_mut(&mut self, direction: Direction) -> &mut Vec<Cell> {
        match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
            Direction::NorthEast => &mut self.north_east,
            Direction::NorthWest => &mut self.north_west,
            Direction::SouthEast => &mut self.south_east,
            Direction::SouthWest => &mut self.south_west,
        }
    }

    /// The cell immediately adjacent in `direction`, if visible.
    pub fn adjacent(&self, direction: Direction) -> Option<Cell> {
        self.ray(direction).first().copied()
    }

    /// Whether a step in `cardinal` is impossible. An empty ray counts as
    /// blocked: nothing visible means nothing to step onto.
    pub fn is_blocked(&self, cardinal: Cardinal) -> bool {
        self.adjacent(cardinal.direction()).is_none_or(Cell::is_wall)
    }

    /// Whether the goal is visible along `cardinal` with no wall in between.
    pub fn goal_in_sight(&self, cardinal: Cardinal) -> bool {
        self.ray(cardinal.direction())
            .iter()
            .take_while(|cell| !cell.is_wall())
            .any(|cell| cell.is_goal())
    }

    /// Number of cardinal directions not blocked by a wall.
    pub fn open_cardinal_count(&self) -> u8 {
        let mut count: u8 = 0;
        for cardinal in Cardinal::ALL {
            if !self.is_blocked(cardinal) {
                count = count.saturating_add(1);
            }
        }
        count
    }
}

/// The environment sends `X` either as a single character or as a
/// one-element list.
fn here_cell<'de, D>(deserializer: D) -> Result<Cell, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Here {
        One(Cell),
        Many(Vec<Cell>),
    }

    Ok(match Here::deserialize(deserializer)? {
        Here::One(cell) => cell,
        Here::Many(cells) => cells.first().copied().unwrap_or_default(),
    })
}
