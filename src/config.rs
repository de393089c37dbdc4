//! Configuration System
//!
//! Layered configuration for the `recsum` frontend: built-in defaults, the
//! global and working-directory config files, environment variables, then
//! command-line flags (applied by the caller).

use crate::error::ConfigError;
use crate::hash::Algorithm;
use crate::logging::{self, LoggingConfig};
use crate::walk::{WalkOptions, DEFAULT_QUEUE_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod loader;
mod merge;
mod sources;

pub use loader::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::local_file::LOCAL_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecsumConfig {
    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hashing and traversal settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Simultaneous hashing workers per root
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Bound of the job queue between traversal and workers
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default)]
    pub follow_links: bool,

    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Path component names to skip entirely
    #[serde(default)]
    pub exclude: Vec<String>,
}

pub(crate) fn default_workers() -> usize {
    3
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            follow_links: false,
            max_depth: None,
            exclude: Vec::new(),
        }
    }
}

impl WalkConfig {
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            queue_capacity: self.queue_capacity,
            follow_links: self.follow_links,
            max_depth: self.max_depth,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.workers < 1 {
            return Err("workers must be at least 1".to_string());
        }
        if self.queue_capacity < 1 {
            return Err("queue_capacity must be at least 1".to_string());
        }
        if self.exclude.iter().any(|p| p.trim().is_empty()) {
            return Err("exclude patterns cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Checksum output rendering
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<hexdigest>  <path>` lines
    #[default]
    Text,
    /// One JSON object per result
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Output file; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl RecsumConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.walk.validate() {
            errors.push(format!("walk: {}", e));
        }
        if let Err(e) = logging::validate_format(&self.logging.format) {
            errors.push(format!("logging: {}", e));
        }
        if self.logging.enabled {
            if let Err(e) = logging::validate_output(&self.logging) {
                errors.push(format!("logging: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }
}
