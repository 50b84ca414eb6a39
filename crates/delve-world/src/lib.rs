//! The explorer's model of the maze and the dead-end pruning engine.
//!
//! This crate turns a stream of local percepts into an incremental map and
//! keeps track of which coordinates still need attention.
//!
//! # Modules
//!
//! - [`world_map`] -- Observed cells, the frontier of unclassified
//!   coordinates, and ray projection from percepts.
//! - [`traversed`] -- The monotone, insertion-ordered set of coordinates the
//!   explorer has visited or retired.
//! - [`pruning`] -- Table-driven classifier that retires frontier cells
//!   proven to be dead ends without visiting them.

pub mod pruning;
pub mod traversed;
pub mod world_map;

// Re-export primary types at crate root.
pub use pruning::{
    NeighborClass, Neighborhood, PruneRule, PruneTemplate, Retirement, TEMPLATES, evaluate, prune,
};
pub use traversed::Traversed;
pub use world_map::WorldMap;
