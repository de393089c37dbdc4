//! Per-file hash results and the shared result stream

use crate::error::HashError;
use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::{Path, PathBuf};

/// Capacity of the result stream created by [`result_channel`].
pub const RESULT_STREAM_CAPACITY: usize = 1;

/// Outcome of hashing a single file.
///
/// `hash` is empty whenever `error` is set.
#[derive(Debug)]
pub struct HashResult {
    path: PathBuf,
    hash: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    error: Option<HashError>,
}

impl HashResult {
    pub(crate) fn from_outcome(
        path: PathBuf,
        outcome: Result<String, HashError>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        let (hash, error) = match outcome {
            Ok(hash) => (hash, None),
            Err(err) => (String::new(), Some(err)),
        };
        Self {
            path,
            hash,
            start,
            end,
            error,
        }
    }

    /// Result for a path that was dequeued after cancellation.
    pub(crate) fn cancelled(path: PathBuf) -> Self {
        let now = Utc::now();
        Self::from_outcome(path, Err(HashError::Cancelled), now, now)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase hex digest, empty on failure
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn error(&self) -> Option<&HashError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Time spent hashing, excluding queue wait
    pub fn elapsed(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// `"<hexdigest>  <path>"`, the classic checksum-file line
    pub fn checksum_line(&self) -> String {
        format!("{}  {}", self.hash, self.path.display())
    }
}

/// Create the shared result stream.
///
/// The buffer is deliberately minimal, so the receiving side must be drained
/// concurrently with any running walk.
pub fn result_channel() -> (Sender<HashResult>, Receiver<HashResult>) {
    bounded(RESULT_STREAM_CAPACITY)
}
