//! Scan observers: the verbosity hook of the traversal.
//!
//! The scanner reports discrete [`ScanEvent`]s to a [`ScanObserver`].
//! Observers only watch; nothing they do can change the scan's results.
//!
//! Two observers are provided:
//! - [`LogObserver`] writes each event through the `log` facade
//! - [`Progress`] shows an indicatif spinner with a running file count

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::duplicates::ScanStatistics;
use crate::scanner::ScanError;

/// One observable step of a scan.
#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// A directory is about to be enumerated.
    EnteringDirectory(&'a Path),
    /// A file was hashed and its fingerprint had not been seen.
    NewFile(&'a Path),
    /// A file was hashed and joined an existing group.
    Duplicate {
        /// The file just hashed
        path: &'a Path,
        /// Original path of the group it joined
        original: &'a Path,
    },
    /// A path could not be read and was skipped with its subtree.
    Skipped {
        /// The unreadable path
        path: &'a Path,
        /// What went wrong
        error: &'a ScanError,
    },
    /// A path that is neither a regular file nor a directory.
    Invalid(&'a Path),
    /// A directory already entered through another path.
    Revisit(&'a Path),
}

/// Receiver of scan events.
///
/// Implement this trait to follow a scan's progress.
pub trait ScanObserver: Send + Sync {
    /// Called for every event, in traversal order.
    fn on_event(&self, event: &ScanEvent<'_>);

    /// Called once when the scan's results are taken.
    fn on_finish(&self, _stats: &ScanStatistics) {}
}

/// Observer that logs every event.
///
/// Per-path events go to `debug`, so they appear with `-v`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn on_event(&self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::EnteringDirectory(path) => {
                log::debug!("Entering directory: {}", path.display());
            }
            ScanEvent::NewFile(path) => {
                log::debug!("New file found: {}", path.display());
            }
            ScanEvent::Duplicate { path, original } => {
                log::debug!(
                    "Duplicate of '{}' found: {}",
                    original.display(),
                    path.display()
                );
            }
            ScanEvent::Skipped { path, error } => {
                log::debug!("Couldn't access '{}', skipping: {}", path.display(), error);
            }
            ScanEvent::Invalid(path) => {
                log::debug!("Invalid path: {}", path.display());
            }
            ScanEvent::Revisit(path) => {
                log::debug!("Already visited, not descending: {}", path.display());
            }
        }
    }

    fn on_finish(&self, stats: &ScanStatistics) {
        log::debug!(
            "Scan finished: {} files, {} directories, {} duplicates",
            stats.total_files,
            stats.total_dirs,
            stats.duplicates
        );
    }
}

/// Spinner showing the number of files hashed so far.
///
/// Draws to stderr and stays invisible when stderr is not a terminal.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a progress spinner.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is ever drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupescan::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
            );
            bar.set_message("Scanning");
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    /// Number of files counted so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ScanObserver for Progress {
    fn on_event(&self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::EnteringDirectory(path) => {
                self.bar
                    .set_message(truncate_path(&path.to_string_lossy(), 40));
            }
            ScanEvent::NewFile(_) | ScanEvent::Duplicate { .. } => self.bar.inc(1),
            ScanEvent::Skipped { .. } | ScanEvent::Invalid(_) | ScanEvent::Revisit(_) => {}
        }
    }

    fn on_finish(&self, _stats: &ScanStatistics) {
        self.bar.finish_and_clear();
    }
}

/// Observer that forwards every event to several observers in order.
#[derive(Default, Clone)]
pub struct Observers {
    inner: Vec<Arc<dyn ScanObserver>>,
}

impl Observers {
    /// Create an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Append an observer.
    #[must_use]
    pub fn with(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.inner.push(observer);
        self
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ScanObserver for Observers {
    fn on_event(&self, event: &ScanEvent<'_>) {
        for observer in &self.inner {
            observer.on_event(event);
        }
    }

    fn on_finish(&self, stats: &ScanStatistics) {
        for observer in &self.inner {
            observer.on_finish(stats);
        }
    }
}

/// Truncate a path for display in the spinner, keeping its tail.
fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max_len - 3)).collect();
    format!("...{}", tail)
}
