//! CLI parse: clap types for recsum. No behavior beyond folding flags into config.

use crate::config::{OutputFormat, RecsumConfig};
use crate::hash::Algorithm;
use crate::VERSION;
use clap::Parser;
use std::path::PathBuf;

/// recsum is a tool for recursively generating hash sums
#[derive(Parser, Debug)]
#[command(name = "recsum", version = VERSION)]
#[command(about = "recsum is a tool for recursively generating hash sums")]
pub struct Cli {
    /// Files or directories to hash
    #[arg(required = true, value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Output file path ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Hash algorithm to use [md5, sha1, sha256, sha512, blake3]
    ///
    /// `-h` is help, not the hash flag.
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Simultaneous workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print per-file and total timings to stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Output format (text or json)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip any path component with this name (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Follow symbolic links during traversal
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum traversal depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable diagnostic logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold command-line flags over a loaded configuration.
    /// Precedence: flags override config file override defaults.
    pub fn apply_to(&self, config: &mut RecsumConfig) {
        if let Some(algorithm) = self.algorithm {
            config.walk.algorithm = algorithm;
        }
        if let Some(workers) = self.workers {
            config.walk.workers = workers;
        }
        if self.follow_links {
            config.walk.follow_links = true;
        }
        if let Some(depth) = self.max_depth {
            config.walk.max_depth = Some(depth);
        }
        config.walk.exclude.extend(self.exclude.iter().cloned());

        if let Some(format) = self.format {
            config.output.format = format;
        }
        match self.output.as_deref() {
            Some("-") => config.output.path = None,
            Some(path) => config.output.path = Some(PathBuf::from(path)),
            None => {}
        }

        if self.quiet {
            config.logging.enabled = false;
        }
        if self.verbose && self.log_level.is_none() {
            config.logging.level = "info".to_string();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(ref file) = self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}
