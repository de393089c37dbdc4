//! Working-directory config file source: ./recsum.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const LOCAL_CONFIG_FILE: &str = "recsum.toml";

/// Add `<dir>/recsum.toml` to the builder if it exists. Overrides the global file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = dir.join(LOCAL_CONFIG_FILE);
    if path.exists() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
