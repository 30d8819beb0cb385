//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config FILE`, or `config.toml` in the platform config dir)
//! 3. `DUPESCAN_*` environment variables (e.g. `DUPESCAN_CHUNK_SIZE=65536`)
//! 4. Command-line flags
//!
//! # Example
//!
//! ```toml
//! follow_symlinks = true
//! chunk_size = 65536
//! output = "json"
//! progress = false
//! ```

use anyhow::Result;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::scanner::{ScannerConfig, DEFAULT_CHUNK_SIZE};

/// Prefix of the environment variables read by [`Config::load`].
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Follow symbolic links below the sources.
    pub follow_symlinks: bool,
    /// Read chunk size for hashing, in bytes.
    pub chunk_size: usize,
    /// Results page format.
    pub output: OutputFormat,
    /// Show a progress spinner while scanning.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            output: OutputFormat::Text,
            progress: true,
        }
    }
}

impl Config {
    /// Load from `explicit`, or from the default location when `None`.
    ///
    /// Never fails: a malformed file or variable is logged and the
    /// defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_figment(Self::base_figment().merge(Env::prefixed(ENV_PREFIX))),
        }
    }

    /// Load defaults, then the TOML file at `path`, then the environment.
    ///
    /// A missing file contributes nothing.
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        Self::load_from_figment(Self::figment(path))
    }

    /// The full provider stack for a given config file.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Self::base_figment()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn load_from_figment(figment: Figment) -> Self {
        match figment.extract::<Self>() {
            Ok(config) => config.normalized(),
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        if self.chunk_size == 0 {
            log::warn!("chunk_size must be positive, using {}", DEFAULT_CHUNK_SIZE);
            self.chunk_size = DEFAULT_CHUNK_SIZE;
        }
        self
    }

    /// Apply command-line overrides.
    ///
    /// Boolean switches can only turn a behaviour on (or the spinner off);
    /// options override when given.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.follow_symlinks {
            self.follow_symlinks = true;
        }
        if let Some(chunk_size) = cli.chunk_size {
            self.chunk_size = chunk_size;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if cli.no_progress || cli.quiet || cli.verbose > 0 {
            self.progress = false;
        }
    }

    /// Scanner settings derived from this configuration.
    #[must_use]
    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig::default()
            .with_follow_symlinks(self.follow_symlinks)
            .with_chunk_size(self.chunk_size)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupescan").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
