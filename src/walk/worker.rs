//! Hashing workers draining the job queue

use crate::hash::{build_file_hash, HashAlgorithm};
use crate::result::HashResult;
use crate::walk::cancel::CancellationToken;
use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Per-worker statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Files hashed successfully
    pub hashed: u64,
    /// Files whose result carries an error
    pub failed: u64,
    /// Set when the result stream was closed under this worker
    pub disconnected: bool,
}

/// A single hashing worker
pub(crate) struct Worker {
    pub id: usize,
    pub algorithm: Arc<dyn HashAlgorithm>,
    pub output: Sender<HashResult>,
    pub cancel: CancellationToken,
}

impl Worker {
    /// Process jobs until the queue is closed and empty.
    ///
    /// Returns early only if the result stream has no receiver left.
    pub(crate) fn run(self, jobs: Receiver<PathBuf>) -> WorkerStats {
        let mut stats = WorkerStats::default();

        for path in jobs.iter() {
            let result = if self.cancel.is_cancelled() {
                HashResult::cancelled(path)
            } else {
                let start = Utc::now();
                let outcome = build_file_hash(self.algorithm.as_ref(), &path);
                let end = Utc::now();
                HashResult::from_outcome(path, outcome, start, end)
            };

            match result.error() {
                None => stats.hashed += 1,
                Some(err) => {
                    stats.failed += 1;
                    debug!(
                        worker = self.id,
                        path = %result.path().display(),
                        error = %err,
                        "Hash failed"
                    );
                }
            }

            if self.output.send(result).is_err() {
                debug!(worker = self.id, "Result stream closed, worker exiting");
                stats.disconnected = true;
                break;
            }
        }

        debug!(
            worker = self.id,
            hashed = stats.hashed,
            failed = stats.failed,
            "Worker finished"
        );
        stats
    }
}

/// Sum per-worker statistics
pub(crate) fn aggregate_stats(stats: &[WorkerStats]) -> WorkerStats {
    stats.iter().fold(WorkerStats::default(), |mut total, s| {
        total.hashed += s.hashed;
        total.failed += s.failed;
        total.disconnected |= s.disconnected;
        total
    })
}
