//! Running counters for a scan.

/// Aggregate statistics accumulated during a scan.
///
/// After any scan, `total_files == unique_files + duplicates` and
/// `duplicate_size` equals the reclaimable bytes of all groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Files successfully hashed
    pub total_files: u64,
    /// Directories fully enumerated
    pub total_dirs: u64,
    /// Bytes across all hashed files
    pub total_size: u64,
    /// Distinct fingerprints seen
    pub unique_files: u64,
    /// Files beyond the first in any group
    pub duplicates: u64,
    /// Bytes occupied by those duplicate files
    pub duplicate_size: u64,
}

impl ScanStatistics {
    /// Count a file whose fingerprint was new.
    pub fn record_unique(&mut self, size: u64) {
        self.total_files += 1;
        self.total_size += size;
        self.unique_files += 1;
    }

    /// Count a file whose fingerprint was already known.
    pub fn record_duplicate(&mut self, size: u64) {
        self.total_files += 1;
        self.total_size += size;
        self.duplicates += 1;
        self.duplicate_size += size;
    }

    /// Count a directory whose children were all visited.
    pub fn record_directory(&mut self) {
        self.total_dirs += 1;
    }
}
