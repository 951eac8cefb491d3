//! Engine configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Configuration for rule graph traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Times one path may enter the same node before evaluation is aborted.
    pub max_node_visits: u32,

    /// End the whole evaluation at the first Error node instead of
    /// continuing through its `Next` port.
    pub stop_at_first_error: bool,

    /// Replaced by the conspirator's name in diagnostic messages.
    pub conspirator_token: String,

    /// Replaced by the target's name in diagnostic messages.
    pub target_token: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_node_visits: 64,
            stop_at_first_error: false,
            conspirator_token: "{Conspirator}".to_string(),
            target_token: "{Target}".to_string(),
        }
    }
}

/// Configuration for the cooperative candidate search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// Rule evaluations between two yields to the scheduler.
    pub batch_size: usize,

    /// Fixed shuffle seed, for reproducible searches.
    pub seed: Option<u64>,
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            batch_size: 4,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub interpreter: InterpreterConfig,
    pub matchmaking: MatchmakingConfig,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
