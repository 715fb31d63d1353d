//! Configuration sources, lowest precedence first.

use super::{ENV_PREFIX, WORKSPACE_CONFIG_FILE};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;

type Builder = ConfigBuilder<DefaultState>;

/// Optional `testsync.toml` at the workspace root
pub fn workspace_file(builder: Builder, workspace_root: &Path) -> Builder {
    let path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
}

/// A file the caller named explicitly; format follows the extension
pub fn explicit_file(builder: Builder, path: &Path) -> Builder {
    builder.add_source(File::from(path).required(true))
}

/// `TESTSYNC__*` variables, `__` separating nested keys
pub fn environment(builder: Builder) -> Builder {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}
