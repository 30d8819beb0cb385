//! JSON output formatter for scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "total_files": 3,
//!     "total_dirs": 1,
//!     "total_size": 3,
//!     "unique_files": 2,
//!     "duplicates": 1,
//!     "duplicate_size": 1,
//!     "duplicate_groups": 1,
//!     "interrupted": false,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   },
//!   "skipped": [{ "path": "/locked", "reason": "Permission denied: /locked" }],
//!   "duplicates": [
//!     {
//!       "name": "a.txt",
//!       "digest": "cf83e135...",
//!       "size": 1,
//!       "total_size": 2,
//!       "files": ["/dir/a.txt", "/dir/b.txt"]
//!     }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::FileGroup;
use crate::error::ExitCode;
use crate::scanner::{ScanOutcome, SkippedPath};

/// An unreadable path, in JSON form.
///
/// Paths that are not valid UTF-8 are rendered lossily.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSkipped {
    /// The path as reached during traversal
    pub path: String,
    /// Why it could not be read
    pub reason: String,
}

impl JsonSkipped {
    /// Convert a [`SkippedPath`].
    #[must_use]
    pub fn from_skipped(skipped: &SkippedPath) -> Self {
        Self {
            path: skipped.path.to_string_lossy().into_owned(),
            reason: skipped.reason.clone(),
        }
    }
}

/// A group with duplicates, in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Base name of the first file found
    pub name: String,
    /// SHA-512 digest as hexadecimal (128 characters)
    pub digest: String,
    /// Size of each file in bytes
    pub size: u64,
    /// Size of all copies together in bytes
    pub total_size: u64,
    /// All paths, original first
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Convert a [`FileGroup`].
    #[must_use]
    pub fn from_group(group: &FileGroup) -> Self {
        Self {
            name: group.name.clone(),
            digest: group.fingerprint.to_hex(),
            size: group.size,
            total_size: group.total_size(),
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files hashed
    pub total_files: u64,
    /// Directories fully enumerated
    pub total_dirs: u64,
    /// Bytes across all hashed files
    pub total_size: u64,
    /// Distinct contents
    pub unique_files: u64,
    /// Files beyond the first copy
    pub duplicates: u64,
    /// Bytes deduplication would free
    pub duplicate_size: u64,
    /// Groups with more than one file
    pub duplicate_groups: usize,
    /// Whether the scan was interrupted
    pub interrupted: bool,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Unreadable paths in encounter order
    pub skipped: Vec<JsonSkipped>,
    /// Groups with duplicates, largest total size first
    pub duplicates: Vec<JsonDuplicateGroup>,
}

impl JsonOutput {
    /// Build the JSON document for a finished scan.
    #[must_use]
    pub fn new(outcome: &ScanOutcome) -> Self {
        let exit_code = ExitCode::from_outcome(outcome);
        let duplicates: Vec<JsonDuplicateGroup> = outcome
            .groups
            .sorted_by_total_size()
            .into_iter()
            .filter(|g| g.has_duplicates())
            .map(JsonDuplicateGroup::from_group)
            .collect();
        let stats = &outcome.stats;

        Self {
            summary: JsonSummary {
                total_files: stats.total_files,
                total_dirs: stats.total_dirs,
                total_size: stats.total_size,
                unique_files: stats.unique_files,
                duplicates: stats.duplicates,
                duplicate_size: stats.duplicate_size,
                duplicate_groups: duplicates.len(),
                interrupted: outcome.interrupted,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
            skipped: outcome.skipped.iter().map(JsonSkipped::from_skipped).collect(),
            duplicates,
        }
    }

    /// Write pretty JSON and a trailing newline to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
