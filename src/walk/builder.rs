//! Walk orchestration
//!
//! One [`Builder`] per root. `walk` starts the worker pool, runs the
//! traversal on the calling thread, closes the job queue and waits for
//! every worker before returning.

use crate::error::WalkError;
use crate::hash::HashAlgorithm;
use crate::result::HashResult;
use crate::walk::cancel::CancellationToken;
use crate::walk::filter::{default_filter, Filter};
use crate::walk::walker::{Traversal, TraversalStats, WalkOptions};
use crate::walk::worker::{aggregate_stats, Worker, WorkerStats};
use crossbeam_channel::{bounded, Sender};
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lifecycle of a single walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Constructed, not yet walked
    Idle,
    /// Workers started, traversal in progress
    Running,
    /// Traversal finished, workers finishing queued jobs
    Draining,
    /// All workers exited
    Done,
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WalkState::Idle => "idle",
            WalkState::Running => "running",
            WalkState::Draining => "draining",
            WalkState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Counters for a completed walk
#[derive(Debug, Clone)]
pub struct WalkSummary {
    pub root: PathBuf,
    /// Paths accepted by the filter
    pub queued: u64,
    /// Results emitted without error
    pub hashed: u64,
    /// Results emitted with an error
    pub failed: u64,
    /// Entries rejected by the filter
    pub skipped: u64,
    /// Traversal errors below the root, handed to the filter
    pub errors: u64,
    pub duration: Duration,
}

/// Recursive hash builder for one root path
pub struct Builder {
    root: PathBuf,
    algorithm: Arc<dyn HashAlgorithm>,
    output: Sender<HashResult>,
    filter: Box<Filter>,
    workers: usize,
    options: WalkOptions,
    cancel: CancellationToken,
}

impl Builder {
    /// Create a builder for `root`.
    ///
    /// Results for every hashed file are sent to `output`. `workers` sets how
    /// many files are hashed concurrently and must be at least 1.
    pub fn new(
        root: impl Into<PathBuf>,
        algorithm: Arc<dyn HashAlgorithm>,
        output: Sender<HashResult>,
        workers: usize,
    ) -> Result<Self, WalkError> {
        if workers < 1 {
            return Err(WalkError::InvalidWorkerCount(workers));
        }
        Ok(Self {
            root: root.into(),
            algorithm,
            output,
            filter: Box::new(default_filter),
            workers,
            options: WalkOptions::default(),
            cancel: CancellationToken::new(),
        })
    }

    /// Replace traversal options
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a cancellation token shared with the caller
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Override which entries get hashed. The default keeps regular files
    /// and symlinks.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&Path, Option<&Metadata>, Option<&walkdir::Error>) -> bool + Send + Sync + 'static,
    {
        self.filter = Box::new(filter);
    }

    /// Root path being walked
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Walk the root and hash every accepted file, blocking until all
    /// results have been sent.
    ///
    /// Per-file failures are reported through the result stream only. An
    /// error is returned when the root cannot be accessed, the walk was
    /// cancelled, or the result stream was closed early.
    pub fn walk(self) -> Result<WalkSummary, WalkError> {
        let started = Instant::now();
        let mut state = WalkState::Idle;
        info!(
            root = %self.root.display(),
            algorithm = self.algorithm.name(),
            workers = self.workers,
            "Starting walk"
        );

        let (traversal, workers) = thread::scope(|scope| {
            let (job_tx, job_rx) = bounded::<PathBuf>(self.options.queue_capacity.max(1));

            let mut handles = Vec::with_capacity(self.workers);
            for id in 0..self.workers {
                let worker = Worker {
                    id,
                    algorithm: Arc::clone(&self.algorithm),
                    output: self.output.clone(),
                    cancel: self.cancel.clone(),
                };
                let jobs = job_rx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("recsum-worker-{}", id))
                    .spawn_scoped(scope, move || worker.run(jobs));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(err) => {
                        // Dropping the sender lets already spawned workers exit.
                        drop(job_tx);
                        return (Err(WalkError::WorkerSpawn(err)), Vec::new());
                    }
                }
            }
            drop(job_rx);
            transition(&self.root, &mut state, WalkState::Running);

            let traversal = Traversal {
                root: &self.root,
                options: &self.options,
                filter: self.filter.as_ref(),
                cancel: &self.cancel,
            }
            .run(job_tx);
            transition(&self.root, &mut state, WalkState::Draining);

            let workers: Vec<thread::Result<WorkerStats>> =
                handles.into_iter().map(|handle| handle.join()).collect();
            (traversal, workers)
        });
        transition(&self.root, &mut state, WalkState::Done);

        let summary = finish(self.root, traversal, workers, started.elapsed())?;
        info!(
            root = %summary.root.display(),
            queued = summary.queued,
            hashed = summary.hashed,
            failed = summary.failed,
            errors = summary.errors,
            duration_ms = summary.duration.as_millis() as u64,
            "Walk completed"
        );
        Ok(summary)
    }
}

fn transition(root: &Path, state: &mut WalkState, next: WalkState) {
    debug!(root = %root.display(), from = %state, to = %next, "Walk state");
    *state = next;
}

/// Combine traversal and worker outcomes. Traversal errors win over worker
/// panics, which win over a closed result stream.
fn finish(
    root: PathBuf,
    traversal: Result<TraversalStats, WalkError>,
    workers: Vec<thread::Result<WorkerStats>>,
    duration: Duration,
) -> Result<WalkSummary, WalkError> {
    let mut panicked = false;
    let mut stats = Vec::with_capacity(workers.len());
    for outcome in workers {
        match outcome {
            Ok(s) => stats.push(s),
            Err(_) => panicked = true,
        }
    }
    let totals = aggregate_stats(&stats);

    let traversal = traversal?;
    if panicked {
        return Err(WalkError::WorkerPanicked);
    }
    if totals.disconnected {
        return Err(WalkError::ResultStreamClosed);
    }

    Ok(WalkSummary {
        root,
        queued: traversal.queued,
        hashed: totals.hashed,
        failed: totals.failed,
        skipped: traversal.skipped,
        errors: traversal.errors,
        duration,
    })
}
