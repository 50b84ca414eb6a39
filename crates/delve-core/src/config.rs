//! Configuration loading and typed config structures for Delve.
//!
//! The canonical configuration lives in `delve-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure, and
//! provides a loader that reads the file and applies environment overrides.
//! Every field has a default, so an empty file is a valid configuration.

use std::path::Path;

use delve_agents::ExplorerConfig;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`EpisodeConfig::max_turns`].
pub const ENV_MAX_TURNS: &str = "DELVE_MAX_TURNS";

/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "DELVE_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidOverride {
        /// The environment variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelveConfig {
    /// Explorer behavior switches.
    #[serde(default)]
    pub explorer: ExplorerConfig,

    /// Episode limits.
    #[serde(default)]
    pub episode: EpisodeConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DelveConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DELVE_MAX_TURNS` overrides `episode.max_turns`
    /// - `DELVE_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] if an override does not parse.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without looking at the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `DELVE_MAX_TURNS` is not
    /// a positive integer.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_TURNS) {
            self.episode.max_turns = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&turns| turns > 0)
                .ok_or(ConfigError::InvalidOverride {
                    key: ENV_MAX_TURNS,
                    value,
                })?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
        Ok(())
    }
}

/// Limits on a single episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Turns allowed before the episode is abandoned (default: 10000).
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,
}

const fn default_max_turns() -> u64 {
    10_000
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: `info`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: pretty).
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use delve_types::Cardinal;

    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = DelveConfig::parse_yaml("").unwrap();
        assert_eq!(config, DelveConfig::default());
        assert_eq!(config.episode.max_turns, 10_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.explorer.pruning);
    }

    #[test]
    fn partial_sections_fill_in() {
        let yaml = "\
explorer:
  loop_shortcuts: false
  fallback: E
episode:
  max_turns: 500
logging:
  format: json
";
        let config = DelveConfig::parse_yaml(yaml).unwrap();
        assert!(config.explorer.pruning);
        assert!(!config.explorer.loop_shortcuts);
        assert_eq!(config.explorer.fallback, Cardinal::East);
        assert_eq!(config.episode.max_turns, 500);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn bad_yaml_is_an_error() {
        let err = DelveConfig::parse_yaml("episode: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn overrides_replace_values() {
        let mut config = DelveConfig::default();
        config
            .apply_overrides(|key| match key {
                ENV_MAX_TURNS => Some("42".to_owned()),
                ENV_LOG_LEVEL => Some("delve_agents=trace".to_owned()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.episode.max_turns, 42);
        assert_eq!(config.logging.level, "delve_agents=trace");
    }

    #[test]
    fn unparsable_override_is_rejected() {
        let mut config = DelveConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_MAX_TURNS).then(|| "zero".to_owned()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride { key: ENV_MAX_TURNS, .. }
        ));
        assert_eq!(config.episode.max_turns, 10_000);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DelveConfig::from_file(Path::new("/nonexistent/delve-config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
