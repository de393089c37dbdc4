//! CLI domain: parse, route and output only.
//! Hashing itself lives in the walk module.

mod output;
mod parse;
mod route;

pub use output::{format_failure, render_json, ResultSink, SinkStats};
pub use parse::Cli;
pub use route::{RunContext, RunReport};
