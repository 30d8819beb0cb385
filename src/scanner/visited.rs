//! Resolved-directory tracking for symlink-following scans.
//!
//! # Overview
//!
//! When symbolic links are followed, two different paths can lead to the
//! same directory, and a link pointing at one of its own ancestors forms a
//! cycle. [`VisitedDirs`] remembers every directory already descended into
//! so the traversal enters each one at most once.
//!
//! # Platform Support
//!
//! - **Unix**: keyed by (device_id, inode) from the directory's metadata
//! - **Other**: keyed by the canonicalized path

use std::collections::HashSet;
use std::fs::Metadata;
use std::io;
#[cfg(not(unix))]
use std::path::PathBuf;
use std::path::Path;

/// Set of directories already entered during one scan.
///
/// `VisitedDirs` is NOT thread-safe. It is owned by a single scanner.
#[derive(Debug, Default)]
pub struct VisitedDirs {
    seen: HashSet<DirKey>,
}

impl VisitedDirs {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Record a directory, returning `true` on its first visit.
    ///
    /// `metadata` must describe the resolved directory (from
    /// [`std::fs::metadata`], not `symlink_metadata`).
    ///
    /// # Errors
    ///
    /// On platforms without inode information, canonicalizing `path` can
    /// fail; that error is returned to the caller.
    pub fn first_visit(&mut self, path: &Path, metadata: &Metadata) -> io::Result<bool> {
        let key = DirKey::resolve(path, metadata)?;
        Ok(self.seen.insert(key))
    }

    /// Number of distinct directories recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no directory has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Platform-specific identity of a resolved directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DirKey {
    #[cfg(unix)]
    Inode { dev: u64, ino: u64 },
    #[cfg(not(unix))]
    Canonical(PathBuf),
}

impl DirKey {
    #[cfg(unix)]
    fn resolve(_path: &Path, metadata: &Metadata) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;
        Ok(Self::Inode {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn resolve(path: &Path, _metadata: &Metadata) -> io::Result<Self> {
        std::fs::canonicalize(path).map(Self::Canonical)
    }
}
