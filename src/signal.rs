//! Ctrl+C handling for interruptible scans.
//!
//! A [`ShutdownHandler`] wraps an `AtomicBool` that the Ctrl+C hook sets.
//! The scanner checks the flag between path visits, stops walking, and
//! still hands back everything gathered so far.
//!
//! ```rust,no_run
//! use dupescan::scanner::{Scanner, ScannerConfig};
//! use dupescan::signal::install_handler;
//!
//! let handler = install_handler();
//! let scanner = Scanner::new(ScannerConfig::default())
//!     .with_shutdown_flag(handler.get_flag());
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request a shutdown manually.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get the flag to hand to a [`Scanner`](crate::scanner::Scanner).
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag so the handler can be reused.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C hook and return its handler.
///
/// The hook can only be registered once per process. Later calls return
/// the same handler with its flag cleared. If registration fails, an
/// unhooked handler is returned; it still honours `request_shutdown`.
pub fn install_handler() -> ShutdownHandler {
    let handler = GLOBAL_HANDLER.get_or_init(|| {
        let handler = ShutdownHandler::new();
        let flag = handler.get_flag();

        let installed = ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\nInterrupted. Finishing report with partial results...");
            let _ = stderr.flush();
        });
        if let Err(e) = installed {
            log::debug!("Ctrl+C handler not installed, using unhooked handler: {}", e);
        }
        handler
    });

    handler.reset();
    handler.clone()
}
