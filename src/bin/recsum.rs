//! Recsum CLI Binary
//!
//! Recursively generates checksums for every file under the given paths.

use anyhow::{Context, Result};
use clap::Parser;
use recsum::cli::{Cli, ResultSink, RunContext};
use recsum::config::{ConfigLoader, RecsumConfig};
use recsum::error::RunError;
use recsum::logging::init_logging;
use recsum::walk::CancellationToken;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::{debug, info};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("recsum: {:#}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }
    info!(version = recsum::VERSION, "recsum starting");
    debug!(?config, "Effective configuration");

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, shutting down...");
        interrupt.cancel();
    })
    .context("Failed to set signal handler")?;

    let output_path = config.output.path.clone();
    let out: Box<dyn Write + Send> = match output_path {
        Some(ref path) => {
            let file = File::create(path).map_err(|source| RunError::OutputFile {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let sink = ResultSink::new(config.output.format, cli.verbose, out, io::stderr());

    let context = RunContext::new(config, cancel);
    let (report, _) = context.execute(&cli.paths, sink)?;

    for (root, err) in &report.root_failures {
        eprintln!("recsum: {}: {}", root.display(), err);
    }
    if let Some(ref path) = output_path {
        eprintln!("Output written to '{}'", path.display());
    }
    if cli.verbose || output_path.is_some() {
        eprintln!("Completed in {:?}", report.elapsed);
    }

    info!(
        succeeded = report.output.succeeded,
        failed = report.output.failed,
        roots_failed = report.root_failures.len(),
        "recsum finished"
    );
    Ok(report.exit_code())
}

/// Configuration precedence: flags > env > explicit or discovered files > defaults.
fn build_config(cli: &Cli) -> Result<RecsumConfig> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            ConfigLoader::load(&cwd).context("Failed to load configuration")?
        }
    };
    cli.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
