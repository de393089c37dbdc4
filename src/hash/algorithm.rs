//! Digest algorithm capabilities

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Streaming hash state for a single file.
pub trait Accumulator: Send {
    /// Feed data into the accumulator.
    fn update(&mut self, data: &[u8]);

    /// Consume the accumulator and return the fixed-length digest.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Constructor for fresh accumulators.
///
/// Implementations must be shareable across worker threads; every file gets
/// its own accumulator.
pub trait HashAlgorithm: Send + Sync {
    /// Short display name, e.g. `sha256`
    fn name(&self) -> &str;

    /// Create an empty accumulator
    fn accumulator(&self) -> Box<dyn Accumulator>;
}

/// Adapter from any RustCrypto `Digest` to [`Accumulator`].
struct DigestAccumulator<D>(D);

impl<D> Accumulator for DigestAccumulator<D>
where
    D: digest::Digest + Send,
{
    fn update(&mut self, data: &[u8]) {
        digest::Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let DigestAccumulator(inner) = *self;
        digest::Digest::finalize(inner).to_vec()
    }
}

impl Accumulator for blake3::Hasher {
    fn update(&mut self, data: &[u8]) {
        blake3::Hasher::update(self, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        blake3::Hasher::finalize(&self).as_bytes().to_vec()
    }
}

/// Built-in algorithms selectable from the command line and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha512,
    Blake3,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Blake3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 | Algorithm::Blake3 => 32,
            Algorithm::Sha512 => 64,
        }
    }
}

impl HashAlgorithm for Algorithm {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn accumulator(&self) -> Box<dyn Accumulator> {
        match self {
            Algorithm::Md5 => Box::new(DigestAccumulator(md5::Md5::default())),
            Algorithm::Sha1 => Box::new(DigestAccumulator(sha1::Sha1::default())),
            Algorithm::Sha256 => Box::new(DigestAccumulator(sha2::Sha256::default())),
            Algorithm::Sha512 => Box::new(DigestAccumulator(sha2::Sha512::default())),
            Algorithm::Blake3 => Box::new(blake3::Hasher::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}
