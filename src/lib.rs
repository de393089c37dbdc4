//! Recsum: Recursive Checksums
//!
//! Walks one or more directory trees and hashes every file concurrently,
//! streaming timestamped per-file results (or per-file errors) to a single
//! caller-owned channel.

pub mod cli;
pub mod config;
pub mod error;
pub mod hash;
pub mod logging;
pub mod result;
pub mod walk;

/// Crate version, fixed at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{HashError, WalkError};
pub use hash::{Algorithm, HashAlgorithm};
pub use result::{result_channel, HashResult};
pub use walk::{Builder, CancellationToken, WalkOptions, WalkSummary};
