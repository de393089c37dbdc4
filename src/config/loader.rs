//! Configuration loading

use super::merge::merge_policy;
use super::sources::{global_file, local_file};
use super::RecsumConfig;
use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, `<working_dir>/recsum.toml` and
    /// `RECSUM__*` environment variables, in increasing precedence.
    pub fn load(working_dir: &Path) -> Result<RecsumConfig, ConfigError> {
        let global = global_file::global_config_path();
        Self::load_with_global(global.as_deref(), working_dir)
    }

    /// Same as [`load`](Self::load) with an explicit global file location.
    pub fn load_with_global(
        global: Option<&Path>,
        working_dir: &Path,
    ) -> Result<RecsumConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global)?;
        let builder = local_file::add_to_builder(builder, working_dir)?;
        Self::finish(builder)
    }

    /// Load a single explicit file on top of the defaults. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<RecsumConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<RecsumConfig, ConfigError> {
        let config: RecsumConfig = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
