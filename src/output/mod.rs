//! Output formatters for scan results.
//!
//! - [`TextOutput`]: the human-readable results page
//! - [`JsonOutput`]: a JSON document for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupescan::output::TextOutput;
//! use dupescan::scanner::{Scanner, ScannerConfig};
//!
//! let outcome = Scanner::new(ScannerConfig::default()).scan(&["."]);
//! print!("{}", TextOutput::new(&outcome).render());
//! ```

pub mod json;
pub mod save;
pub mod text;

pub use json::{JsonOutput, JsonOutputError};
pub use save::{check_destinations, save_results, SaveError};
pub use text::TextOutput;

use crate::cli::OutputFormat;
use crate::scanner::ScanOutcome;

/// Render a finished scan in the requested format.
///
/// # Errors
///
/// Fails only if JSON serialization fails.
pub fn render(outcome: &ScanOutcome, format: OutputFormat) -> Result<String, JsonOutputError> {
    match format {
        OutputFormat::Text => Ok(TextOutput::new(outcome).render()),
        OutputFormat::Json => {
            let mut buffer = Vec::new();
            JsonOutput::new(outcome).write_to(&mut buffer)?;
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        }
    }
}
