//! Dead-end pruning over the frontier.
//!
//! Once per turn, before the explorer picks a move, every frontier
//! coordinate is matched against a fixed table of local escape-route
//! templates. A coordinate whose surroundings prove it cannot lead anywhere
//! new is retired into the traversed set without ever being visited.
//!
//! Each of the 8 neighbors is classified as traversed, wall, goal, or
//! unknown (traversed membership wins over map content). A template names:
//!
//! - a **sealed** set of directions that must all be traversed or wall;
//! - a **required-goal** set that must all be unvisited goal cells;
//! - optionally a **toward-agent** direction: the template also fires when
//!   that sealed neighbor is the cell the explorer is standing on.
//!
//! Retirement is irreversible, so a matching template is only acted on when
//! the coordinate has no cardinal exit into unexplored territory: every
//! cardinal neighbor must be traversed, wall, or goal.

use delve_types::{Cardinal, Direction, Position};
use serde::Serialize;
use tracing::trace;
use Direction::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

use crate::world_map::WorldMap;

// ---------------------------------------------------------------------------
// Neighbor classification
// ---------------------------------------------------------------------------

/// What the pruning engine knows about one neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NeighborClass {
    /// Visited or already retired.
    Traversed,
    /// Observed wall.
    Wall,
    /// Observed goal, not yet traversed.
    Goal,
    /// Unobserved, or observed as passable.
    Unknown,
}

impl NeighborClass {
    /// Traversed or wall: nothing left to explore in that direction.
    pub const fn is_sealed(self) -> bool {
        matches!(self, Self::Traversed | Self::Wall)
    }
}

/// Classification of all 8 neighbors of one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    /// Indexed in [`Direction::ALL`] order.
    classes: [NeighborClass; 8],
}

impl Neighborhood {
    /// Classify the neighbors of `center` against the current map.
    pub fn classify(world: &WorldMap, center: Position) -> Self {
        let classes = Direction::ALL.map(|direction| {
            let neighbor = center.step(direction);
            if world.is_traversed(neighbor) {
                return NeighborClass::Traversed;
            }
            match world.cell(neighbor) {
                Some(cell) if cell.is_wall() => NeighborClass::Wall,
                Some(cell) if cell.is_goal() => NeighborClass::Goal,
                _ => NeighborClass::Unknown,
            }
        });
        Self { classes }
    }

    /// Build a neighborhood directly, in [`Direction::ALL`] order.
    pub const fn from_classes(classes: [NeighborClass; 8]) -> Self {
        Self { classes }
    }

    /// The class of the neighbor in `direction`.
    pub fn class(&self, direction: Direction) -> NeighborClass {
        Direction::ALL
            .iter()
            .zip(self.classes.iter())
            .find_map(|(&d, &class)| (d == direction).then_some(class))
            .unwrap_or(NeighborClass::Unknown)
    }

    /// Whether all 8 neighbors are goal cells.
    pub fn all_goal(&self) -> bool {
        self.classes.iter().all(|&class| class == NeighborClass::Goal)
    }

    /// Whether no cardinal exit leads into unexplored, non-goal territory.
    pub fn cardinals_accounted(&self) -> bool {
        Cardinal::ALL
            .into_iter()
            .all(|cardinal| self.class(cardinal.direction()) != NeighborClass::Unknown)
    }
}

// ---------------------------------------------------------------------------
// Template table
// ---------------------------------------------------------------------------

/// One local escape-route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneTemplate {
    /// Directions that must be traversed or wall.
    pub sealed: &'static [Direction],
    /// Directions that must all be unvisited goal cells.
    pub required_goal: &'static [Direction],
    /// Sealed direction that may instead point at the explorer.
    pub toward_agent: Option<Direction>,
}

impl PruneTemplate {
    /// Whether this template fires for `center` given its neighborhood and
    /// the explorer's current position.
    pub fn matches(&self, hood: &Neighborhood, center: Position, agent: Position) -> bool {
        if !self.sealed.iter().all(|&d| hood.class(d).is_sealed()) {
            return false;
        }
        let goals_waiting = self
            .required_goal
            .iter()
            .all(|&d| hood.class(d) == NeighborClass::Goal);
        let faces_agent = self
            .toward_agent
            .is_some_and(|d| center.step(d) == agent);
        goals_waiting || faces_agent
    }
}

/// The template table, tested in order; the first match wins.
pub const TEMPLATES: [PruneTemplate; 16] = [
    // Three walls plus both far diagonals.
    PruneTemplate { sealed: &[N, E, W, SE, SW], required_goal: &[], toward_agent: None },
    PruneTemplate { sealed: &[N, E, S, SW, NW], required_goal: &[], toward_agent: None },
    PruneTemplate { sealed: &[E, S, W, NE, NW], required_goal: &[], toward_agent: None },
    PruneTemplate { sealed: &[N, S, W, NE, SE], required_goal: &[], toward_agent: None },
    // Three sides closed, the open side faces goal cells or the explorer.
    PruneTemplate { sealed: &[N, E, W], required_goal: &[SW, S, SE], toward_agent: Some(N) },
    PruneTemplate { sealed: &[N, E, S], required_goal: &[W, SW, NW], toward_agent: Some(N) },
    PruneTemplate { sealed: &[E, S, W], required_goal: &[N, NE, NW], toward_agent: Some(E) },
    PruneTemplate { sealed: &[N, S, W], required_goal: &[E, NE, SE], toward_agent: Some(N) },
    // Corner closed, the opposite corner is goal.
    PruneTemplate { sealed: &[N, E], required_goal: &[S, W, SW], toward_agent: None },
    PruneTemplate { sealed: &[E, S], required_goal: &[N, W, NW], toward_agent: None },
    PruneTemplate { sealed: &[S, W], required_goal: &[N, E, NE], toward_agent: None },
    PruneTemplate { sealed: &[N, W], required_goal: &[E, S, SE], toward_agent: None },
    // One side closed, everything else around it is goal.
    PruneTemplate { sealed: &[N], required_goal: &[E, SE, S, SW, W], toward_agent: None },
    PruneTemplate { sealed: &[E], required_goal: &[N, NW, W, SW, S], toward_agent: None },
    PruneTemplate { sealed: &[S], required_goal: &[E, NE, N, NW, W], toward_agent: None },
    PruneTemplate { sealed: &[W], required_goal: &[N, NE, E, SE, S], toward_agent: None },
];

// ---------------------------------------------------------------------------
// Pruning pass
// ---------------------------------------------------------------------------

/// Why a coordinate was retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PruneRule {
    /// Surrounded by goal cells on all 8 sides.
    AllGoal,
    /// Matched [`TEMPLATES`] at this index.
    Template(usize),
}

/// A coordinate retired during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Retirement {
    /// The retired coordinate.
    pub position: Position,
    /// The rule that retired it.
    pub rule: PruneRule,
}

/// Decide whether `center` should be retired, without mutating anything.
pub fn evaluate(world: &WorldMap, center: Position, agent: Position) -> Option<PruneRule> {
    let hood = Neighborhood::classify(world, center);
    if hood.all_goal() {
        return Some(PruneRule::AllGoal);
    }
    if !hood.cardinals_accounted() {
        return None;
    }
    TEMPLATES
        .iter()
        .position(|template| template.matches(&hood, center, agent))
        .map(PruneRule::Template)
}

/// Run one pruning pass over a snapshot of the frontier.
///
/// Coordinates are visited in coordinate order. A retirement is visible to
/// later coordinates in the same pass, but coordinates are never revisited
/// within a pass.
pub fn prune(world: &mut WorldMap, agent: Position) -> Vec<Retirement> {
    let snapshot: Vec<Position> = world.frontier_positions().collect();
    let mut retired = Vec::new();
    for position in snapshot {
        if world.is_traversed(position) {
            continue;
        }
        if let Some(rule) = evaluate(world, position, agent) {
            world.commit(position);
            trace!(%position, ?rule, "retired frontier cell");
            retired.push(Retirement { position, rule });
        }
    }
    retired
}
