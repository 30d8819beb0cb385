//! Command-line interface definitions for dupescan.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and print the results page
//! dupescan ~/Downloads
//!
//! # Scan two sources and save the results page, replacing an old one
//! dupescan -s results.txt -f ~/Photos /mnt/backup/Photos
//!
//! # Show every file as it is hashed
//! dupescan -v ~/Downloads
//! ```

use bytesize::ByteSize;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scan sources for duplicate files and generate a results page.
///
/// Files are compared by the SHA-512 digest of their full content. Every
/// source is scanned recursively and all sources share one report.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to scan
    #[arg(value_name = "SOURCE", required_unless_present = "print_config")]
    pub sources: Vec<PathBuf>,

    /// Increase verbosity level (-v lists every file, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the results page
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Save the results page to FILE (can be given multiple times)
    #[arg(
        short = 's',
        long = "save-results",
        value_name = "FILE",
        value_parser = parse_destination
    )]
    pub save_results: Vec<PathBuf>,

    /// Overwrite results files that already exist
    #[arg(short, long, visible_alias = "overwrite")]
    pub force: bool,

    /// Results page format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Follow symbolic links below the given sources
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Read chunk size for hashing (e.g. 8KiB, 1MiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_chunk_size)]
    pub chunk_size: Option<usize>,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE", env = "DUPESCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Format of the results page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parse a results destination, rejecting an empty name.
fn parse_destination(s: &str) -> Result<PathBuf, String> {
    if s.is_empty() {
        Err("Asked to save results, but no destination was given".to_string())
    } else {
        Ok(PathBuf::from(s))
    }
}

/// Parse a human-readable chunk size such as `64KiB`.
///
/// # Errors
///
/// Returns an error for unparseable input, zero, or sizes that do not fit
/// in memory.
pub fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let size: ByteSize = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid size {s:?}: {e}"))?;
    match usize::try_from(size.as_u64()) {
        Ok(0) => Err("Chunk size must be at least one byte".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Chunk size too large: {}", size)),
    }
}
