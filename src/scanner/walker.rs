//! Recursive traversal engine.
//!
//! # Overview
//!
//! [`Scanner`] walks one or more root paths depth-first. Every regular file
//! is hashed and recorded into a [`FileGroups`] map, directories are
//! enumerated and recursed into, and anything else is ignored. The scanner
//! owns its accumulators for the whole scan and hands them over as a
//! [`ScanOutcome`] when [`Scanner::finish`] is called.
//!
//! # Failure containment
//!
//! An access fault on one path (permission denied, a file vanishing between
//! listing and reading, a device error, a dangling symlink) is caught at
//! that path's boundary. The path is appended to the skipped list, its
//! subtree is abandoned, and the walk continues with its siblings. Only
//! `std::io::Error`s raised for the path itself are absorbed this way.
//!
//! # Symbolic links
//!
//! Root paths are always resolved through symlinks. Below the roots, links
//! are reported as invalid paths unless `follow_symlinks` is set. When it
//! is, every resolved directory is entered at most once, so link cycles
//! terminate.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let outcome = Scanner::new(ScannerConfig::default())
//!     .scan(&[Path::new("/home/user/Downloads")]);
//!
//! for group in outcome.groups.with_duplicates() {
//!     println!("{} has {} copies", group.name, group.len());
//! }
//! ```

use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::visited::VisitedDirs;
use super::{Hasher, ScanError, ScannerConfig, SkippedPath};
use crate::duplicates::{FileGroups, Recorded, ScanStatistics};
use crate::progress::{ScanEvent, ScanObserver};

/// Final results of a scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Files grouped by fingerprint
    pub groups: FileGroups,
    /// Unreadable paths in the order they were met
    pub skipped: Vec<SkippedPath>,
    /// Aggregate counters
    pub stats: ScanStatistics,
    /// Whether the scan stopped early on a shutdown request
    pub interrupted: bool,
}

impl ScanOutcome {
    /// Whether any file had a duplicate.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.stats.duplicates > 0
    }

    /// Paths of the skipped entries, in order.
    pub fn skipped_paths(&self) -> impl Iterator<Item = &Path> {
        self.skipped.iter().map(|s| s.path.as_path())
    }
}

/// Depth-first duplicate scanner.
///
/// A `Scanner` is single-threaded and owns its grouping map, skipped list
/// and statistics. Calling [`explore`](Self::explore) for several roots
/// accumulates them into one result.
pub struct Scanner {
    config: ScannerConfig,
    hasher: Hasher,
    groups: FileGroups,
    skipped: Vec<SkippedPath>,
    stats: ScanStatistics,
    visited: VisitedDirs,
    observer: Option<Arc<dyn ScanObserver>>,
    shutdown_flag: Option<Arc<AtomicBool>>,
    interrupted: bool,
}

impl Scanner {
    /// Create a scanner with empty accumulators.
    #[must_use]
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            hasher: Hasher::with_chunk_size(config.chunk_size),
            config,
            groups: FileGroups::new(),
            skipped: Vec::new(),
            stats: ScanStatistics::default(),
            visited: VisitedDirs::new(),
            observer: None,
            shutdown_flag: None,
            interrupted: false,
        }
    }

    /// Attach an observer that receives every [`ScanEvent`].
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// The flag is checked before each path is visited. Once it is set, the
    /// walk unwinds without visiting anything else and the outcome is
    /// marked as interrupted.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Scan every root and return the combined outcome.
    #[must_use]
    pub fn scan<P: AsRef<Path>>(mut self, roots: &[P]) -> ScanOutcome {
        for root in roots {
            self.explore(root.as_ref());
        }
        self.finish()
    }

    /// Visit a root path: a single file, or a directory and all its
    /// descendants.
    ///
    /// Never fails; unreadable paths end up in the skipped list.
    pub fn explore(&mut self, path: &Path) {
        log::debug!("Scanning source: {}", path.display());
        self.explore_path(path, true);
    }

    /// Consume the scanner and return its results.
    #[must_use]
    pub fn finish(self) -> ScanOutcome {
        if let Some(observer) = &self.observer {
            observer.on_finish(&self.stats);
        }
        ScanOutcome {
            groups: self.groups,
            skipped: self.skipped,
            stats: self.stats,
            interrupted: self.interrupted,
        }
    }

    /// Check if shutdown has been requested, latching the result.
    fn is_shutdown_requested(&mut self) -> bool {
        if !self.interrupted
            && self
                .shutdown_flag
                .as_ref()
                .is_some_and(|f| f.load(Ordering::SeqCst))
        {
            log::debug!("Scanner: Shutdown requested, stopping traversal");
            self.interrupted = true;
        }
        self.interrupted
    }

    /// Containment boundary for a single path.
    fn explore_path(&mut self, path: &Path, is_root: bool) {
        if self.is_shutdown_requested() {
            return;
        }

        if let Err(error) = self.visit(path, is_root) {
            notify(
                &self.observer,
                &ScanEvent::Skipped {
                    path,
                    error: &error,
                },
            );
            self.skipped.push(SkippedPath {
                path: path.to_path_buf(),
                reason: error.to_string(),
            });
        }
    }

    fn visit(&mut self, path: &Path, is_root: bool) -> Result<(), ScanError> {
        let Some(metadata) = self.classify(path, is_root)? else {
            notify(&self.observer, &ScanEvent::Invalid(path));
            return Ok(());
        };

        let file_type = metadata.file_type();
        if file_type.is_file() {
            self.visit_file(path, metadata.len())
        } else if file_type.is_dir() {
            self.visit_dir(path, &metadata)
        } else {
            notify(&self.observer, &ScanEvent::Invalid(path));
            Ok(())
        }
    }

    /// Fetch metadata, resolving symlinks for roots or when configured.
    ///
    /// Returns `Ok(None)` for a path that does not exist at all. A dangling
    /// symlink does exist, so following it is an access fault.
    fn classify(&self, path: &Path, is_root: bool) -> Result<Option<Metadata>, ScanError> {
        let result = if is_root || self.config.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };

        match result {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == ErrorKind::NotFound && fs::symlink_metadata(path).is_err() => {
                Ok(None)
            }
            Err(e) => Err(ScanError::from_io(path, e)),
        }
    }

    fn visit_file(&mut self, path: &Path, size: u64) -> Result<(), ScanError> {
        let fingerprint = self.hasher.hash_file(path)?;

        match self.groups.record(fingerprint, path, size) {
            Recorded::New => {
                self.stats.record_unique(size);
                notify(&self.observer, &ScanEvent::NewFile(path));
            }
            Recorded::Duplicate { original } => {
                self.stats.record_duplicate(size);
                notify(&self.observer, &ScanEvent::Duplicate { path, original });
            }
        }
        Ok(())
    }

    fn visit_dir(&mut self, path: &Path, metadata: &Metadata) -> Result<(), ScanError> {
        if self.config.follow_symlinks
            && !self
                .visited
                .first_visit(path, metadata)
                .map_err(|e| ScanError::from_io(path, e))?
        {
            notify(&self.observer, &ScanEvent::Revisit(path));
            return Ok(());
        }

        notify(&self.observer, &ScanEvent::EnteringDirectory(path));

        let mut children = fs::read_dir(path)
            .and_then(|entries| {
                entries
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<Result<Vec<PathBuf>, _>>()
            })
            .map_err(|e| ScanError::from_io(path, e))?;

        // Sort children for deterministic output
        children.sort();

        for child in &children {
            self.explore_path(child, false);
            if self.interrupted {
                return Ok(());
            }
        }

        self.stats.record_directory();
        Ok(())
    }
}

fn notify(observer: &Option<Arc<dyn ScanObserver>>, event: &ScanEvent<'_>) {
    if let Some(observer) = observer {
        observer.on_event(event);
    }
}
