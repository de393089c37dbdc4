//! CLI output: renders the result stream.
//!
//! Successful checksums go to the primary writer; failures and timings go to
//! the diagnostic writer.

use crate::config::OutputFormat;
use crate::result::HashResult;
use serde_json::json;
use std::io::{self, Write};

/// Counters for what a sink has written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub succeeded: u64,
    pub failed: u64,
}

/// Consumer side of the result stream
pub struct ResultSink<W: Write, D: Write> {
    format: OutputFormat,
    verbose: bool,
    out: W,
    diagnostics: D,
    stats: SinkStats,
}

impl<W: Write, D: Write> ResultSink<W, D> {
    pub fn new(format: OutputFormat, verbose: bool, out: W, diagnostics: D) -> Self {
        Self {
            format,
            verbose,
            out,
            diagnostics,
            stats: SinkStats::default(),
        }
    }

    /// Render one result.
    pub fn record(&mut self, result: &HashResult) -> io::Result<()> {
        match result.error() {
            None => self.stats.succeeded += 1,
            Some(_) => self.stats.failed += 1,
        }

        match self.format {
            OutputFormat::Text => {
                if result.is_ok() {
                    writeln!(self.out, "{}", result.checksum_line())?;
                }
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", render_json(result))?;
            }
        }

        if let Some(line) = format_failure(result) {
            writeln!(self.diagnostics, "{}", line)?;
        }
        if self.verbose {
            writeln!(
                self.diagnostics,
                "{} completed in {:?}",
                result.path().display(),
                result.elapsed().to_std().unwrap_or_default()
            )?;
        }
        Ok(())
    }

    /// Drain results until every sender is gone.
    ///
    /// Stops at the first write error; dropping the receiver then makes
    /// the walk side fail with a closed result stream.
    pub fn drain<I>(&mut self, results: I) -> io::Result<SinkStats>
    where
        I: IntoIterator<Item = HashResult>,
    {
        for result in results {
            self.record(&result)?;
        }
        self.flush()?;
        Ok(self.stats)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.diagnostics.flush()
    }

    pub fn stats(&self) -> SinkStats {
        self.stats
    }

    pub fn into_inner(self) -> (W, D) {
        (self.out, self.diagnostics)
    }
}

/// `<path> failed with error '<error>'` for failed results
pub fn format_failure(result: &HashResult) -> Option<String> {
    result.error().map(|err| {
        format!(
            "{} failed with error '{}'",
            result.path().display(),
            err
        )
    })
}

/// One JSON object per result; failures carry `error` and an empty hash.
pub fn render_json(result: &HashResult) -> serde_json::Value {
    json!({
        "path": result.path().to_string_lossy(),
        "hash": result.hash(),
        "start": result.start().to_rfc3339(),
        "end": result.end().to_rfc3339(),
        "elapsed_ms": result.elapsed().num_milliseconds(),
        "error": result.error().map(|e| e.to_string()),
    })
}
