//! Writing the results page to files.
//!
//! Destinations are checked before the scan starts, so a long scan never
//! ends in an overwrite refusal. Failures while saving afterwards are
//! reported per file and never discard the results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while preparing results destinations.
#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    /// One or more destinations exist and overwriting was not allowed.
    #[error("{} results file(s) already exist; use -f/--force/--overwrite to replace them", .0.len())]
    DestinationsExist(Vec<PathBuf>),
}

/// Check that no destination exists, unless `force` is set.
///
/// Every conflicting destination is collected so they can all be reported
/// at once.
///
/// # Errors
///
/// Returns [`SaveError::DestinationsExist`] listing each existing file.
pub fn check_destinations(destinations: &[PathBuf], force: bool) -> Result<(), SaveError> {
    if force {
        return Ok(());
    }
    let existing: Vec<PathBuf> = destinations
        .iter()
        .filter(|d| d.exists())
        .cloned()
        .collect();
    if existing.is_empty() {
        Ok(())
    } else {
        Err(SaveError::DestinationsExist(existing))
    }
}

/// Write `contents` to every destination, replacing existing files.
///
/// Returns the destinations that could not be written, with their errors.
pub fn save_results(contents: &str, destinations: &[PathBuf]) -> Vec<(PathBuf, io::Error)> {
    let mut failures = Vec::new();
    for destination in destinations {
        match write_one(contents, destination) {
            Ok(()) => log::info!("Saved results to {}", destination.display()),
            Err(e) => failures.push((destination.clone(), e)),
        }
    }
    failures
}

fn write_one(contents: &str, destination: &Path) -> io::Result<()> {
    fs::write(destination, contents.as_bytes())
}
