//! Logging System
//!
//! Structured diagnostics via the `tracing` crate. Stdout is reserved for
//! checksum output, so logs go to stderr or to a file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (required when output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format on stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stderr,
    File(PathBuf),
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (RECSUM_LOG, RECSUM_LOG_FORMAT, RECSUM_LOG_OUTPUT)
/// 2. The supplied config (already merged with CLI flags by the caller)
/// 3. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let destination = determine_destination(config)?;

    let base_subscriber = Registry::default().with(filter);

    let installed = match (format.as_str(), destination) {
        ("json", Destination::File(path)) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(Mutex::new(open_log_file(&path)?)),
            )
            .try_init(),
        ("json", Destination::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (_, Destination::File(path)) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(Mutex::new(open_log_file(&path)?)),
            )
            .try_init(),
        (_, Destination::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| ConfigError::Logging(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Logging(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ConfigError::Logging(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("RECSUM_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ConfigError::Logging(format!("Invalid log directive: {}", e)))?,
        );
    }

    if let Ok(modules_str) = std::env::var("RECSUM_LOG_MODULES") {
        for directive in parse_module_directives(&modules_str) {
            filter = filter.add_directive(directive.parse().map_err(|e| {
                ConfigError::Logging(format!("Invalid log directive from env: {}", e))
            })?);
        }
    }

    Ok(filter)
}

/// Split `module=level,other=level` into directives, ignoring malformed parts.
fn parse_module_directives(directives: &str) -> Vec<String> {
    directives
        .split(',')
        .filter_map(|part| {
            let (module, level) = part.split_once('=')?;
            let (module, level) = (module.trim(), level.trim());
            if module.is_empty() || level.is_empty() {
                return None;
            }
            Some(format!("{}={}", module, level))
        })
        .collect()
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<String, ConfigError> {
    if let Ok(format) = std::env::var("RECSUM_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    validate_format(&config.format)?;
    Ok(config.format.clone())
}

pub(crate) fn validate_format(format: &str) -> Result<(), ConfigError> {
    if format != "json" && format != "text" {
        return Err(ConfigError::Invalid(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(())
}

/// Determine output destination from config or environment
fn determine_destination(config: &LoggingConfig) -> Result<Destination, ConfigError> {
    let output = std::env::var("RECSUM_LOG_OUTPUT").unwrap_or_else(|_| config.output.clone());
    parse_destination(&output, config.file.as_ref())
}

fn parse_destination(output: &str, file: Option<&PathBuf>) -> Result<Destination, ConfigError> {
    match output {
        "stderr" => Ok(Destination::Stderr),
        "file" => file.cloned().map(Destination::File).ok_or_else(|| {
            ConfigError::Invalid("Log output 'file' requires a log file path".to_string())
        }),
        _ => Err(ConfigError::Invalid(format!(
            "Invalid log output: {} (must be 'stderr' or 'file')",
            output
        ))),
    }
}

pub(crate) fn validate_output(config: &LoggingConfig) -> Result<(), ConfigError> {
    parse_destination(&config.output, config.file.as_ref()).map(|_| ())
}
