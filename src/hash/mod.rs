//! Content hashing
//!
//! The walk core only sees the opaque [`HashAlgorithm`] capability. The
//! [`Algorithm`] catalogue is what the frontend injects.

pub mod algorithm;
pub mod hasher;

pub use algorithm::{Accumulator, Algorithm, HashAlgorithm};
pub use hasher::build_file_hash;
