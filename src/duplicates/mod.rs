//! Duplicate grouping module.
//!
//! This module provides the accumulators a scan fills in:
//! - Fingerprint-keyed file groups
//! - Aggregate scan statistics

pub mod groups;
pub mod stats;

pub use groups::{FileGroup, FileGroups, Recorded};
pub use stats::ScanStatistics;
