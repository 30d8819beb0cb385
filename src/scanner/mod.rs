//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Streaming SHA-512 content fingerprints
//! - Recursive depth-first traversal with per-path failure containment
//! - Directory revisit detection when following symbolic links
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`hasher`]: the digest engine (one file in, one [`Fingerprint`] out)
//! - [`walker`]: the traversal engine that groups files by fingerprint
//! - [`visited`]: resolved-directory tracking for symlink cycles
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let mut scanner = Scanner::new(ScannerConfig::default());
//! scanner.explore(Path::new("."));
//! let outcome = scanner.finish();
//!
//! println!(
//!     "{} files, {} duplicates",
//!     outcome.stats.total_files, outcome.stats.duplicates
//! );
//! ```

pub mod hasher;
pub mod visited;
pub mod walker;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{Fingerprint, Hasher, DEFAULT_CHUNK_SIZE, FINGERPRINT_LEN};
pub use walker::{ScanOutcome, Scanner};

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Follow symbolic links during traversal.
    ///
    /// When disabled, symlinks are reported as invalid paths and ignored.
    /// When enabled, resolved directories are visited at most once.
    pub follow_symlinks: bool,

    /// Read chunk size for the digest engine, in bytes.
    pub chunk_size: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ScannerConfig {
    /// Set whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the read chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// A path that could not be read, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    /// Path as it was reached during traversal
    pub path: PathBuf,
    /// Human-readable description of the access fault
    pub reason: String,
}

/// Errors that can occur while visiting a single path.
///
/// These are access faults: the traversal records them and moves on.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path, or the target of a followed symlink, does not exist.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file or directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Classify an I/O error raised while visiting `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while hashing `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
