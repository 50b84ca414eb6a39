//! Configuration, episode driving, and telemetry for the Delve explorer.
//!
//! This crate connects the explorer to the outside world: it loads
//! `delve-config.yaml`, defines the interface a maze environment must
//! implement, and runs episodes turn by turn.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `delve-config.yaml` into
//!   strongly-typed structs, with environment overrides.
//! - [`decision`] -- [`DecisionSource`] trait, implemented by the explorer
//!   and by [`ScriptedDecisionSource`].
//! - [`environment`] -- [`Environment`] trait for maze simulators.
//! - [`episode`] -- [`run_episode`], the turn loop.
//! - [`telemetry`] -- `tracing` subscriber installation.
//!
//! [`DecisionSource`]: decision::DecisionSource
//! [`ScriptedDecisionSource`]: decision::ScriptedDecisionSource
//! [`Environment`]: environment::Environment
//! [`run_episode`]: episode::run_episode

pub mod config;
pub mod decision;
pub mod environment;
pub mod episode;
pub mod telemetry;

pub use config::{ConfigError, DelveConfig, EpisodeConfig, LogFormat, LoggingConfig};
pub use decision::{DecisionError, DecisionSource, ScriptedDecisionSource};
pub use environment::{Environment, EnvironmentError, StepOutcome};
pub use episode::{EpisodeError, EpisodeSummary, run_episode};
pub use telemetry::TelemetryError;
