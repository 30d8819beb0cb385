//! Process exit codes and the `--json-errors` error record.
//!
//! The exit code tells scripts how a scan ended without parsing the
//! results page:
//!
//! | code | name  | meaning |
//! |------|-------|---------|
//! | 0    | DS000 | duplicates were found (also `--print-config`) |
//! | 1    | DS001 | the scan could not start or results could not be printed |
//! | 2    | DS002 | every file is unique |
//! | 3    | DS003 | the scan finished but some paths were unreadable |
//! | 130  | DS130 | Ctrl+C stopped the walk; results are partial |

use serde::Serialize;

use crate::scanner::ScanOutcome;

/// How a dupescan run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// At least one group has duplicates.
    Success = 0,
    /// Missing source, refused results file, or an output failure.
    Failed = 1,
    /// No two scanned files share a fingerprint.
    NoDuplicates = 2,
    /// At least one path landed in the skipped list.
    PathsSkipped = 3,
    /// The shutdown flag stopped the traversal.
    Interrupted = 130,
}

impl ExitCode {
    /// Numeric value passed to `std::process::exit`.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// `DS` name shown in error messages and JSON.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::Failed => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PathsSkipped => "DS003",
            Self::Interrupted => "DS130",
        }
    }

    /// Pick the exit code describing a finished scan.
    ///
    /// Interruption wins over skipped paths, which win over the
    /// duplicates/no-duplicates distinction.
    #[must_use]
    pub fn from_outcome(outcome: &ScanOutcome) -> Self {
        if outcome.interrupted {
            Self::Interrupted
        } else if !outcome.skipped.is_empty() {
            Self::PathsSkipped
        } else if outcome.has_duplicates() {
            Self::Success
        } else {
            Self::NoDuplicates
        }
    }
}

/// Error printed to stderr as JSON when `--json-errors` is given.
///
/// ```json
/// { "code": "DS001", "exit_code": 1, "message": "Source '/nope' doesn't exist or can't be accessed" }
/// ```
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// `DS` name of the exit code
    pub code: String,
    /// Numeric exit code
    pub exit_code: i32,
    /// The error with its whole context chain
    pub message: String,
}

impl StructuredError {
    /// Describe `err`, which ends the process with `exit_code`.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
