//! Log setup for the command-line tool.
//!
//! Everything goes through the `log` facade with `env_logger` writing to
//! stderr, so the results page on stdout stays clean. The level comes from
//! `RUST_LOG` when it is set, otherwise from the command line:
//!
//! | flags   | level |
//! |---------|-------|
//! | `-q`    | error |
//! | (none)  | info  |
//! | `-v`    | debug |
//! | `-vv`   | trace |
//!
//! Scan events are logged at debug, so `-v` prints every directory entered
//! and every file hashed.
//!
//! ```rust,no_run
//! dupescan::logging::init_logging(1, false);
//! log::debug!("Entering directory: /tmp");
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Install the global logger.
///
/// Without `RUST_LOG` the chosen level covers this crate only and other
/// crates are capped at `warn`. A second call leaves the first logger in
/// place.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);
    let rust_log = std::env::var("RUST_LOG").ok();

    let mut builder = Builder::new();
    match &rust_log {
        Some(spec) => {
            builder.parse_filters(spec);
        }
        None => {
            builder
                .filter_level(level.min(LevelFilter::Warn))
                .filter_module(env!("CARGO_CRATE_NAME"), level);
        }
    }
    apply_format(&mut builder, verbose);

    if builder.try_init().is_ok() {
        match rust_log {
            Some(spec) => log::trace!("Log filters from RUST_LOG: {}", spec),
            None => log::trace!("Log level: {}", level),
        }
    }
}

/// Map the CLI flags to a level filter.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Plain `LEVEL message` lines; `-vv` adds a timestamp and the target.
fn apply_format(builder: &mut Builder, verbose: u8) {
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if verbose >= 2 {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} {}: {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        }
    });
}
