//! Coordinator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Handover coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoverConfig {
    /// Whether the coordinator acts on fleet events at all. When false the
    /// coordinator stays fully passive regardless of the fleet's own flag.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Capacity of the bounded fleet event channel.
    #[serde(default = "default_queue_depth")]
    pub event_queue_depth: usize,

    /// Emit a debug trace for every dispatched event.
    #[serde(default)]
    pub verbose_logging: bool,
}

impl Default for HandoverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            event_queue_depth: default_queue_depth(),
            verbose_logging: false,
        }
    }
}

impl HandoverConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_queue_depth() -> usize {
    64
}
