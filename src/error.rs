//! Error types for the recursive checksum system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned from constructing or running a walk.
///
/// Per-file failures never show up here; they travel inside
/// [`HashResult`](crate::result::HashResult) as a [`HashError`].
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Must have at least 1 worker (got {0})")]
    InvalidWorkerCount(usize),

    #[error("Failed to access root {root:?}: {source}")]
    RootInaccessible {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Walk cancelled")]
    Cancelled,

    #[error("Result stream closed before the walk finished")]
    ResultStreamClosed,

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Worker thread panicked")]
    WorkerPanicked,
}

/// Per-file hashing errors
#[derive(Debug, Error)]
pub enum HashError {
    #[error("open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cancelled before hashing")]
    Cancelled,
}

impl HashError {
    /// Underlying I/O error kind, if any
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            HashError::Open { source, .. } | HashError::Read { source, .. } => Some(source.kind()),
            HashError::Cancelled => None,
        }
    }
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown hash algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Errors from the `recsum` frontend run loop
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to create output file {path:?}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Output consumer thread panicked")]
    ConsumerPanicked,
}
