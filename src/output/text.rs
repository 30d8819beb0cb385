//! Human-readable results page.
//!
//! The page has three parts: a summary block, the list of skipped paths
//! (if any), and every group that has duplicates, largest total size first.
//!
//! ```text
//! ============ Summary ============
//! Files scanned            : 3
//! Directories scanned      : 1
//! Total file size          : 3 B
//! Unique files             : 2
//! Duplicates               : 1
//! Potential storage savings: 1 B
//!
//!
//! ====== Files that have duplicates ======
//!
//! 'a.txt' (1 B per file, 2 B total):
//! SHA512 digest: 80d2...
//! Found in locations:
//! ├ '/dir/a.txt'
//! └ '/dir/b.txt'
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;

use crate::scanner::ScanOutcome;

/// Renders a [`ScanOutcome`] as the text results page.
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    outcome: &'a ScanOutcome,
}

impl<'a> TextOutput<'a> {
    /// Wrap a finished scan.
    #[must_use]
    pub fn new(outcome: &'a ScanOutcome) -> Self {
        Self { outcome }
    }

    /// Render the complete page.
    #[must_use]
    pub fn render(&self) -> String {
        let mut page = String::new();
        self.write_summary(&mut page);
        self.write_skipped(&mut page);
        self.write_groups(&mut page);
        page
    }

    fn write_summary(&self, page: &mut String) {
        let stats = &self.outcome.stats;
        let _ = writeln!(page, "============ Summary ============");
        let _ = writeln!(page, "Files scanned            : {}", format_count(stats.total_files));
        let _ = writeln!(page, "Directories scanned      : {}", format_count(stats.total_dirs));
        let _ = writeln!(page, "Total file size          : {}", format_size(stats.total_size));
        let _ = writeln!(page, "Unique files             : {}", format_count(stats.unique_files));
        let _ = writeln!(page, "Duplicates               : {}", format_count(stats.duplicates));
        let _ = writeln!(
            page,
            "Potential storage savings: {}",
            format_size(stats.duplicate_size)
        );
        page.push('\n');

        if self.outcome.interrupted {
            page.push_str("Scan was interrupted, results are partial.\n\n");
        }
    }

    fn write_skipped(&self, page: &mut String) {
        let skipped = &self.outcome.skipped;
        if skipped.is_empty() {
            return;
        }
        let _ = writeln!(
            page,
            "A total of {} paths were inaccessible, and thus were skipped:",
            skipped.len()
        );
        write_tree(page, skipped.iter().map(|s| s.path.as_path()));
        page.push('\n');
    }

    fn write_groups(&self, page: &mut String) {
        if self.outcome.stats.duplicates == 0 {
            page.push_str("Good news, no duplicates were found!\n");
            return;
        }

        page.push_str("\n====== Files that have duplicates ======\n\n");
        for group in self.outcome.groups.sorted_by_total_size() {
            if !group.has_duplicates() {
                continue;
            }
            let _ = writeln!(
                page,
                "'{}' ({} per file, {} total):",
                group.name,
                format_size(group.size),
                format_size(group.total_size())
            );
            let _ = writeln!(page, "SHA512 digest: {}", group.fingerprint);
            page.push_str("Found in locations:\n");
            write_tree(page, group.paths.iter().map(PathBuf::as_path));
            page.push('\n');
        }
    }
}

/// Write paths as a tree: `├` for each entry, `└` for the last.
fn write_tree<'p>(page: &mut String, paths: impl ExactSizeIterator<Item = &'p Path>) {
    let last = paths.len().saturating_sub(1);
    for (i, path) in paths.enumerate() {
        let marker = if i == last { '└' } else { '├' };
        let _ = writeln!(page, "{} '{}'", marker, path.display());
    }
}

/// Format bytes as human-readable size (IEC units).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Format a count with thousands separators, e.g. `1,234,567`.
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
