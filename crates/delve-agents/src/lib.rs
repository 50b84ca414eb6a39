//! The Delve explorer: depth-first traversal with backtracking and loop
//! shortcuts.
//!
//! This crate contains the per-turn decision logic. It sits between
//! `delve-world` (which owns the map and the pruning engine) and
//! `delve-core` (which drives the explorer against an environment).
//!
//! # Modules
//!
//! - [`config`] -- Behavior switches ([`ExplorerConfig`])
//! - [`explorer`] -- The traversal controller ([`Explorer`])
//! - [`history`] -- Move stack and run history bookkeeping
//! - [`loop_detector`] -- Cycle recognition and shortcut selection

pub mod config;
pub mod explorer;
pub mod history;
pub mod loop_detector;

// Re-export primary types at crate root for convenience.
pub use config::ExplorerConfig;
pub use explorer::{Decision, DecisionKind, Explorer, ExplorerSnapshot, ExplorerStats};
pub use history::{MoveStack, RunHistory, RunStep, StepKind};
pub use loop_detector::{PendingStep, Shortcut, find_shortcut};
