//! Merge rules: defaults, override order.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for environment overrides, e.g. `RECSUM__WALK__WORKERS=8`.
pub const ENV_PREFIX: &str = "RECSUM";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("walk.algorithm", "sha256")?
        .set_default("walk.workers", 3_i64)?
        .set_default("walk.queue_capacity", 20_i64)?
        .set_default("output.format", "text")?
        .set_default("logging.level", "warn")
}

/// Environment layer, always applied last among the sources.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
