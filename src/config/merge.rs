//! MergeService: seeds defaults, layers sources, deserializes to SyncConfig.

use super::sources;
use super::SyncConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a workspace.
    /// Precedence: defaults (lowest) -> workspace file -> environment (highest).
    pub fn load(workspace_root: &Path) -> Result<SyncConfig, ConfigError> {
        let builder = sources::workspace_file(Self::defaults()?, workspace_root);
        Self::finish(sources::environment(builder))
    }

    /// Load config from a specific, required file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<SyncConfig, ConfigError> {
        let builder = sources::explicit_file(Self::defaults()?, path);
        Self::finish(sources::environment(builder))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("enable", true)?
            .set_default("debug_tree", false)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<SyncConfig, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
