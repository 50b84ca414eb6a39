//! Tunables for the explorer.
//!
//! The [`ExplorerConfig`] struct is embedded in the `explorer` section of
//! `delve-config.yaml`. Every field has a default, so an empty section (or
//! no section at all) yields the standard behavior.

use delve_types::Cardinal;
use serde::{Deserialize, Serialize};

/// Behavior switches for one [`Explorer`](crate::Explorer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Run the dead-end pruning pass every turn (default: true).
    #[serde(default = "default_true")]
    pub pruning: bool,

    /// Consult the loop detector at dead ends (default: true).
    ///
    /// When disabled, every dead end is resolved by a single-step backtrack.
    #[serde(default = "default_true")]
    pub loop_shortcuts: bool,

    /// Direction returned when there is neither a forward move nor anything
    /// left to backtrack (default: `N`).
    #[serde(default = "default_fallback")]
    pub fallback: Cardinal,
}

const fn default_true() -> bool {
    true
}

const fn default_fallback() -> Cardinal {
    Cardinal::North
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            pruning: default_true(),
            loop_shortcuts: default_true(),
            fallback: default_fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn missing_fields_take_defaults() {
        let config: ExplorerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ExplorerConfig::default());

        let config: ExplorerConfig =
            serde_json::from_str(r#"{"pruning": false, "fallback": "W"}"#).unwrap();
        assert!(!config.pruning);
        assert!(config.loop_shortcuts);
        assert_eq!(config.fallback, Cardinal::West);
    }
}
