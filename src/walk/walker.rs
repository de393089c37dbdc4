//! Filesystem traversal feeding the job queue

use crate::error::WalkError;
use crate::walk::cancel::CancellationToken;
use crate::walk::filter::Filter;
use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Default job queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;

/// Traversal configuration
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Bound of the job queue between traversal and workers
    pub queue_capacity: usize,
    /// Whether to follow symbolic links (default: false)
    pub follow_links: bool,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            follow_links: false,
            max_depth: None,
        }
    }
}

/// Counters from one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Paths pushed onto the job queue
    pub queued: u64,
    /// Entries rejected by the filter
    pub skipped: u64,
    /// Non-fatal errors below the root
    pub errors: u64,
}

/// Depth-first traversal of a single root
pub(crate) struct Traversal<'a> {
    pub root: &'a Path,
    pub options: &'a WalkOptions,
    pub filter: &'a Filter,
    pub cancel: &'a CancellationToken,
}

impl Traversal<'_> {
    /// Walk the root, pushing accepted paths onto `jobs`.
    ///
    /// Takes the only job sender by value: returning closes the queue.
    pub(crate) fn run(&self, jobs: Sender<PathBuf>) -> Result<TraversalStats, WalkError> {
        let mut stats = TraversalStats::default();

        let walker = WalkDir::new(self.root)
            .follow_links(self.options.follow_links)
            .max_depth(self.options.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            if self.cancel.is_cancelled() {
                debug!(root = %self.root.display(), "Traversal cancelled");
                return Err(WalkError::Cancelled);
            }

            let (path, metadata, error) = match entry {
                Ok(entry) => {
                    let metadata = entry.metadata();
                    let path = entry.into_path();
                    match metadata {
                        Ok(metadata) => (path, Some(metadata), None),
                        Err(err) => (path, None, Some(err)),
                    }
                }
                Err(err) if err.depth() == 0 => {
                    return Err(WalkError::RootInaccessible {
                        root: self.root.to_path_buf(),
                        source: err,
                    });
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.to_path_buf());
                    (path, None, Some(err))
                }
            };

            if let Some(ref err) = error {
                stats.errors += 1;
                warn!(path = %path.display(), error = %err, "Traversal error");
            }

            if !(self.filter)(&path, metadata.as_ref(), error.as_ref()) {
                stats.skipped += 1;
                debug!(path = %path.display(), "Skipped");
                continue;
            }

            if jobs.send(path).is_err() {
                // Every worker has exited; only happens when the result stream closed.
                return Err(WalkError::ResultStreamClosed);
            }
            stats.queued += 1;
        }

        Ok(stats)
    }
}
