//! File content hashing

use crate::error::HashError;
use crate::hash::algorithm::{Accumulator, HashAlgorithm};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// `io::Write` adapter so file contents can be streamed with `io::copy`.
struct AccumulatorWriter<'a>(&'a mut dyn Accumulator);

impl Write for AccumulatorWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Open `path` and hash its full contents with `algorithm`.
///
/// Returns the lowercase hex digest. Open and read failures are reported as
/// distinct [`HashError`] variants; a failed read never yields a partial
/// digest.
pub fn build_file_hash(algorithm: &dyn HashAlgorithm, path: &Path) -> Result<String, HashError> {
    let mut file = File::open(path).map_err(|source| HashError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut accumulator = algorithm.accumulator();
    io::copy(&mut file, &mut AccumulatorWriter(accumulator.as_mut())).map_err(|source| {
        HashError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(hex::encode(accumulator.finalize()))
}
