//! dupescan - Recursive duplicate file scanner
//!
//! Walks files and directories, fingerprints every regular file with
//! SHA-512 and groups files with identical content. Unreadable paths are
//! collected instead of aborting the scan, and the results page lists
//! summary statistics, skipped paths and every group with duplicates.
//!
//! # Library usage
//!
//! ```no_run
//! use dupescan::scanner::{Scanner, ScannerConfig};
//!
//! let outcome = Scanner::new(ScannerConfig::default()).scan(&["/data"]);
//! for group in outcome.groups.with_duplicates() {
//!     println!("{} has {} copies", group.name, group.len());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::SaveError;
use crate::progress::{LogObserver, Observers, Progress};
use crate::scanner::Scanner;

/// Run the application with parsed arguments.
///
/// Returns the exit code describing the scan. Errors are returned for
/// problems found before scanning starts and for failures writing to
/// stdout.
///
/// # Errors
///
/// Fails when a source does not exist, when a results file exists and
/// `--force` was not given, or when the results cannot be printed.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = std::io::stdout();
    run_app_with_writer(cli, &mut stdout.lock())
}

/// Like [`run_app`], writing the results page to `out` instead of stdout.
///
/// # Errors
///
/// Same as [`run_app`].
pub fn run_app_with_writer<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load(cli.config.as_deref());
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    if cli.print_config {
        out.write_all(config.to_toml()?.as_bytes())
            .context("Failed to write configuration")?;
        return Ok(ExitCode::Success);
    }

    for source in &cli.sources {
        if source.metadata().is_err() {
            bail!(
                "Source '{}' doesn't exist or can't be accessed",
                source.display()
            );
        }
    }

    if let Err(err) = output::check_destinations(&cli.save_results, cli.force) {
        let SaveError::DestinationsExist(existing) = &err;
        for path in existing {
            log::error!("Results file '{}' already exists", path.display());
        }
        return Err(err.into());
    }

    let handler = signal::install_handler();
    let mut observers = Observers::new().with(Arc::new(LogObserver));
    if config.progress {
        observers = observers.with(Arc::new(Progress::new(false)));
    }

    let outcome = Scanner::new(config.scanner_config())
        .with_observer(Arc::new(observers))
        .with_shutdown_flag(handler.get_flag())
        .scan(cli.sources.as_slice());

    if outcome.interrupted {
        log::warn!("Scan interrupted, reporting partial results");
    }

    let page = output::render(&outcome, config.output).context("Failed to render results")?;

    out.write_all(page.as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write results")?;

    for (path, err) in output::save_results(&page, &cli.save_results) {
        log::warn!("Could not save results to '{}': {}", path.display(), err);
    }

    Ok(ExitCode::from_outcome(&outcome))
}
