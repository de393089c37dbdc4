//! Concurrent recursive hashing
//!
//! A traversal thread feeds discovered paths into a bounded job queue; a
//! fixed pool of workers hashes them and sends [`HashResult`](crate::result::HashResult)s
//! to a caller-owned result stream. A slow consumer blocks the workers,
//! which in turn block the traversal.

pub mod builder;
pub mod cancel;
pub mod filter;
pub mod walker;
pub(crate) mod worker;

pub use builder::{Builder, WalkState, WalkSummary};
pub use cancel::CancellationToken;
pub use filter::{default_filter, exclude_names, Filter};
pub use walker::{TraversalStats, WalkOptions, DEFAULT_QUEUE_CAPACITY};
pub use worker::WorkerStats;
