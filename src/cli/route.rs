//! Run orchestration for the CLI: one walk per root, one consumer thread
//! draining the shared result stream.

use crate::cli::output::{ResultSink, SinkStats};
use crate::config::RecsumConfig;
use crate::error::{RunError, WalkError};
use crate::hash::HashAlgorithm;
use crate::result::result_channel;
use crate::walk::{exclude_names, Builder, CancellationToken, WalkSummary};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of hashing every requested root
#[derive(Debug)]
pub struct RunReport {
    pub summaries: Vec<WalkSummary>,
    /// Roots whose walk returned an error, in request order
    pub root_failures: Vec<(PathBuf, WalkError)>,
    pub output: SinkStats,
    pub interrupted: bool,
    pub elapsed: Duration,
}

impl RunReport {
    /// Process exit code: 130 when interrupted, 1 when any root failed.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if self.root_failures.is_empty() {
            0
        } else {
            1
        }
    }
}

/// Everything a run needs besides the roots and the sink
pub struct RunContext {
    config: RecsumConfig,
    cancel: CancellationToken,
}

impl RunContext {
    pub fn new(config: RecsumConfig, cancel: CancellationToken) -> Self {
        Self { config, cancel }
    }

    pub fn config(&self) -> &RecsumConfig {
        &self.config
    }

    /// Walk `roots` in order, streaming every result into `sink`.
    ///
    /// A root's walk error is recorded and the remaining roots still run,
    /// except after cancellation or when the sink stopped accepting output.
    pub fn execute<W, D>(
        &self,
        roots: &[PathBuf],
        mut sink: ResultSink<W, D>,
    ) -> Result<(RunReport, ResultSink<W, D>), RunError>
    where
        W: Write + Send,
        D: Write + Send,
    {
        let started = Instant::now();
        let walk = &self.config.walk;
        let algorithm: Arc<dyn HashAlgorithm> = Arc::new(walk.algorithm);
        let (tx, rx) = result_channel();

        let (walked, drained) = thread::scope(|scope| {
            let consumer = scope.spawn(move || {
                let drained = sink.drain(rx.iter());
                (drained, sink)
            });

            let walked = self.walk_roots(roots, &algorithm, tx);
            (walked, consumer.join())
        });

        let (drained, sink) = drained.map_err(|_| RunError::ConsumerPanicked)?;
        let (summaries, root_failures) = walked?;
        let interrupted = self.cancel.is_cancelled();
        let output = drained?;

        Ok((
            RunReport {
                summaries,
                root_failures,
                output,
                interrupted,
                elapsed: started.elapsed(),
            },
            sink,
        ))
    }

    /// Runs every root; the only hard error is an invalid worker count.
    /// Dropping `tx` on return closes the result stream.
    #[allow(clippy::type_complexity)]
    fn walk_roots(
        &self,
        roots: &[PathBuf],
        algorithm: &Arc<dyn HashAlgorithm>,
        tx: crossbeam_channel::Sender<crate::result::HashResult>,
    ) -> Result<(Vec<WalkSummary>, Vec<(PathBuf, WalkError)>), RunError> {
        let walk = &self.config.walk;
        let mut summaries = Vec::new();
        let mut failures = Vec::new();

        for root in roots {
            let mut builder = Builder::new(root, Arc::clone(algorithm), tx.clone(), walk.workers)?
                .with_options(walk.walk_options())
                .with_cancellation(self.cancel.clone());
            if !walk.exclude.is_empty() {
                builder.set_filter(exclude_names(walk.exclude.clone()));
            }

            match builder.walk() {
                Ok(summary) => {
                    info!(root = %root.display(), files = summary.queued, "Root finished");
                    summaries.push(summary);
                }
                Err(err) => {
                    info!(root = %root.display(), error = %err, "Root failed");
                    let stop = matches!(err, WalkError::Cancelled | WalkError::ResultStreamClosed);
                    failures.push((root.clone(), err));
                    if stop {
                        break;
                    }
                }
            }
        }

        Ok((summaries, failures))
    }
}
