//! Shared type definitions for the Delve maze explorer.
//!
//! This crate is the single source of truth for the vocabulary exchanged
//! between the explorer and its environment.
//!
//! # Modules
//!
//! - [`geometry`] -- Compass directions, cardinal moves, grid positions
//! - [`cell`] -- Cell contents as reported by the environment
//! - [`percept`] -- Per-turn observation payload
//! - [`actions`] -- The action token returned each turn

pub mod actions;
pub mod cell;
pub mod geometry;
pub mod percept;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionParseError};
pub use cell::Cell;
pub use geometry::{Cardinal, Direction, Position};
pub use percept::Percept;
