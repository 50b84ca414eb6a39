//! Incremental map of everything the explorer has seen.
//!
//! The [`WorldMap`] owns three related structures:
//!
//! - the observed cells, `Position -> Cell`, which only ever grow or get
//!   overwritten by fresher observations;
//! - the frontier, every known coordinate not yet committed;
//! - the [`Traversed`] set, coordinates visited or pruned.
//!
//! Frontier and traversed are kept disjoint: committing a coordinate removes
//! it from the frontier, and observing an already-committed coordinate does
//! not put it back.

use std::collections::BTreeMap;

use delve_types::{Cardinal, Cell, Percept, Position};

use crate::traversed::Traversed;

/// The explorer's model of the maze.
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    /// Last observed content per coordinate.
    cells: BTreeMap<Position, Cell>,
    /// Known coordinates awaiting classification or a visit.
    frontier: BTreeMap<Position, Cell>,
    /// Coordinates visited or retired.
    traversed: Traversed,
}

impl WorldMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
            frontier: BTreeMap::new(),
            traversed: Traversed::new(),
        }
    }

    // -------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------

    /// Project the four cardinal rays of `percept` outward from `origin`.
    ///
    /// Every cell on a ray is written at its absolute coordinate. Cells not
    /// yet committed are (re)inserted into the frontier with the fresh
    /// content. Diagonal rays are not projected; they are only consulted as
    /// single-cell neighbor lookups. Returns the number of cells written.
    pub fn observe(&mut self, origin: Position, percept: &Percept) -> usize {
        let mut written: usize = 0;
        for cardinal in Cardinal::ALL {
            let mut at = origin;
            for &cell in percept.ray(cardinal.direction()) {
                at = at.neighbor(cardinal);
                self.cells.insert(at, cell);
                if !self.traversed.contains(at) {
                    self.frontier.insert(at, cell);
                }
                written = written.saturating_add(1);
            }
        }
        written
    }

    // -------------------------------------------------------------------
    // Commitment
    // -------------------------------------------------------------------

    /// Commit a coordinate to the traversed set and drop it from the
    /// frontier. Returns `false` if it was already committed.
    pub fn commit(&mut self, position: Position) -> bool {
        self.frontier.remove(&position);
        self.traversed.insert(position)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Last observed content at `position`, if ever seen.
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.cells.get(&position).copied()
    }

    /// Whether `position` has been observed as a wall.
    pub fn is_wall(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_wall)
    }

    /// Whether `position` has been visited or retired.
    pub fn is_traversed(&self, position: Position) -> bool {
        self.traversed.contains(position)
    }

    /// Whether `position` is waiting in the frontier.
    pub fn in_frontier(&self, position: Position) -> bool {
        self.frontier.contains_key(&position)
    }

    /// The traversed set.
    pub const fn traversed(&self) -> &Traversed {
        &self.traversed
    }

    /// Frontier coordinates, in coordinate order.
    pub fn frontier_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.frontier.keys().copied()
    }

    /// Number of frontier coordinates.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of observed coordinates.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cardinal neighbors of `position` that are committed and
    /// not walls.
    pub fn traversed_open_neighbors(&self, position: Position) -> u8 {
        let mut count: u8 = 0;
        for cardinal in Cardinal::ALL {
            let neighbor = position.neighbor(cardinal);
            if self.is_traversed(neighbor) && !self.is_wall(neighbor) {
                count = count.saturating_add(1);
            }
        }
        count
    }
}
