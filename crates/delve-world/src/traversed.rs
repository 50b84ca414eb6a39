//! The monotone set of coordinates the explorer is finished with.
//!
//! A coordinate lands here when the explorer physically leaves it or when
//! the pruning engine retires it. Entries are never removed and never
//! duplicated. Insertion order is kept because it doubles as a record of how
//! the exploration unfolded.

use std::collections::BTreeSet;

use delve_types::Position;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of accounted-for coordinates.
///
/// Serializes as the plain list of coordinates in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Position>", into = "Vec<Position>")]
pub struct Traversed {
    /// Coordinates in the order they were committed.
    order: Vec<Position>,
    /// Membership index over `order`.
    members: BTreeSet<Position>,
}

impl Traversed {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self {
            order: Vec::new(),
            members: BTreeSet::new(),
        }
    }

    /// Commit a coordinate. Returns `false` if it was already present.
    pub fn insert(&mut self, position: Position) -> bool {
        if !self.members.insert(position) {
            return false;
        }
        self.order.push(position);
        true
    }

    /// Whether the coordinate has been committed.
    pub fn contains(&self, position: Position) -> bool {
        self.members.contains(&position)
    }

    /// Number of committed coordinates.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Committed coordinates in insertion order.
    pub fn as_slice(&self) -> &[Position] {
        &self.order
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.order.iter().copied()
    }
}

impl From<Vec<Position>> for Traversed {
    fn from(positions: Vec<Position>) -> Self {
        let mut set = Self::new();
        for position in positions {
            set.insert(position);
        }
        set
    }
}

impl From<Traversed> for Vec<Position> {
    fn from(set: Traversed) -> Self {
        set.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = Traversed::new();
        assert!(set.insert(Position::new(1, 1)));
        assert!(set.insert(Position::new(2, 1)));
        assert!(!set.insert(Position::new(1, 1)));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Position::new(2, 1)));
        assert!(!set.contains(Position::new(3, 1)));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = Traversed::new();
        for p in [Position::new(5, 5), Position::new(1, 1), Position::new(3, 2)] {
            set.insert(p);
        }
        assert_eq!(
            set.as_slice(),
            &[Position::new(5, 5), Position::new(1, 1), Position::new(3, 2)]
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn serializes_as_ordered_list() {
        let mut set = Traversed::new();
        set.insert(Position::new(2, 1));
        set.insert(Position::new(1, 1));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"x":2,"y":1},{"x":1,"y":1}]"#);

        // Duplicates in the input collapse on the way back in.
        let back: Traversed =
            serde_json::from_str(r#"[{"x":2,"y":1},{"x":1,"y":1},{"x":2,"y":1}]"#).unwrap();
        assert_eq!(back, set);
    }
}
