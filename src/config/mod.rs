//! Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `testsync.toml` at the workspace root, then `TESTSYNC__*` environment
//! variables.

pub mod facade;
pub mod merge;
pub mod sources;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub use facade::ConfigLoader;

/// Name of the workspace configuration file
pub const WORKSPACE_CONFIG_FILE: &str = "testsync.toml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "TESTSYNC";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Whether the test tree is maintained at all
    #[serde(default = "default_enable")]
    pub enable: bool,

    /// Log the whole display tree after every resolve
    #[serde(default)]
    pub debug_tree: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_enable() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            debug_tree: false,
            logging: LoggingConfig::default(),
        }
    }
}
