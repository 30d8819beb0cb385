//! Fingerprint grouping of scanned files.
//!
//! # Overview
//!
//! Every file the traversal hashes lands in exactly one [`FileGroup`], keyed
//! by its [`Fingerprint`]. The first path recorded for a fingerprint is the
//! group's original; every later path is a duplicate of it.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::{FileGroups, Recorded};
//! use dupescan::scanner::Hasher;
//! use std::path::Path;
//!
//! let mut groups = FileGroups::new();
//! let fp = Hasher::hash_bytes(b"x");
//!
//! assert!(matches!(groups.record(fp, Path::new("/a/x.txt"), 1), Recorded::New));
//! assert!(matches!(
//!     groups.record(fp, Path::new("/b/x.txt"), 1),
//!     Recorded::Duplicate { .. }
//! ));
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups.get(&fp).unwrap().len(), 2);
//! ```

use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};

use crate::scanner::Fingerprint;

/// All scanned paths sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Content fingerprint shared by every member
    pub fingerprint: Fingerprint,
    /// Base name of the first file seen with this fingerprint
    pub name: String,
    /// Size of each member in bytes
    pub size: u64,
    /// Member paths in discovery order; the first is the original
    pub paths: Vec<PathBuf>,
}

impl FileGroup {
    /// Create a group with a single member.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, path: &Path, size: u64) -> Self {
        Self {
            fingerprint,
            name: display_name(path),
            size,
            paths: vec![path.to_path_buf()],
        }
    }

    /// The first path discovered with this content.
    #[must_use]
    pub fn original(&self) -> &Path {
        &self.paths[0]
    }

    /// Every path after the original.
    #[must_use]
    pub fn duplicates(&self) -> &[PathBuf] {
        &self.paths[1..]
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false`; a group is created with one member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether the group has at least one duplicate.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.paths.len() > 1
    }

    /// Total bytes occupied by all members (`size * occurrence_count`).
    ///
    /// This is the sort key for reports.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.size * self.paths.len() as u64
    }

    /// Bytes that deduplication would free (all copies but one).
    #[must_use]
    pub fn reclaimable(&self) -> u64 {
        self.size * (self.paths.len() as u64 - 1)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Result of recording one file into [`FileGroups`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded<'a> {
    /// First file with this fingerprint; a new group was created.
    New,
    /// The fingerprint was already known; the path joined its group.
    Duplicate {
        /// Original path of the group the file joined
        original: &'a Path,
    },
}

/// Mapping from fingerprint to the group of files sharing it.
#[derive(Debug, Clone, Default)]
pub struct FileGroups {
    groups: HashMap<Fingerprint, FileGroup>,
}

impl FileGroups {
    /// Create an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Record a hashed file.
    ///
    /// Lookup and insertion happen through a single map entry, so one
    /// fingerprint can never produce two groups.
    pub fn record(&mut self, fingerprint: Fingerprint, path: &Path, size: u64) -> Recorded<'_> {
        match self.groups.entry(fingerprint) {
            Entry::Occupied(entry) => {
                let group = entry.into_mut();
                group.paths.push(path.to_path_buf());
                Recorded::Duplicate {
                    original: group.original(),
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(FileGroup::new(fingerprint, path, size));
                Recorded::New
            }
        }
    }

    /// Look up the group for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&FileGroup> {
        self.groups.get(fingerprint)
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no file has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over all groups in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &FileGroup> {
        self.groups.values()
    }

    /// Iterate over groups that contain at least one duplicate.
    pub fn with_duplicates(&self) -> impl Iterator<Item = &FileGroup> {
        self.groups.values().filter(|g| g.has_duplicates())
    }

    /// Groups ordered by `size * occurrence_count` descending.
    ///
    /// Ties are broken by fingerprint so the order is total.
    #[must_use]
    pub fn sorted_by_total_size(&self) -> Vec<&FileGroup> {
        let mut sorted: Vec<&FileGroup> = self.groups.values().collect();
        sorted.sort_by(|a, b| {
            b.total_size()
                .cmp(&a.total_size())
                .then_with(|| a.fingerprint.cmp(&b.fingerprint))
        });
        sorted
    }

    /// Sum of [`FileGroup::reclaimable`] over every group.
    #[must_use]
    pub fn reclaimable(&self) -> u64 {
        self.groups.values().map(FileGroup::reclaimable).sum()
    }
}
