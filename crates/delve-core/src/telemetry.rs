//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` wins when it is set
//! and valid; otherwise the configured level is used.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::{LogFormat, LoggingConfig};

/// Errors that can occur when installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter {directive:?}: {source}")]
    Filter {
        /// The rejected directive.
        directive: String,
        /// The underlying parse error.
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {source}")]
    Install {
        /// The underlying error.
        #[from]
        source: TryInitError,
    },
}

/// Build the filter: `RUST_LOG` if usable, else `config.level`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] if `config.level` is not a valid
/// filter directive and `RUST_LOG` did not supply one.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|source| TelemetryError::Filter {
        directive: config.level.clone(),
        source,
    })
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .finish()
            .try_init()?,
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .finish()
            .try_init()?,
    }
    Ok(())
}
