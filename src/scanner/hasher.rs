//! SHA-512 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing content
//! fingerprints. Files are read in fixed-size chunks, so memory use is
//! bounded by the chunk size no matter how large the file is.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let fingerprint = hasher.hash_file(Path::new("Cargo.toml")).unwrap();
//! println!("{}", fingerprint);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest, Sha512};

use super::HashError;

/// Length of a fingerprint in bytes (SHA-512 output).
pub const FINGERPRINT_LEN: usize = 64;

/// Default read chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// SHA-512 digest of a file's full content.
///
/// Two files are treated as duplicates exactly when their fingerprints are
/// equal. A collision between different contents is assumed not to happen.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Lowercase hexadecimal representation (128 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        use std::fmt::Write as _;
        let mut hex = String::with_capacity(FINGERPRINT_LEN * 2);
        for byte in &self.0 {
            let _ = write!(hex, "{:02x}", byte);
        }
        hex
    }

    /// Parse a hexadecimal string produced by [`to_hex`](Self::to_hex).
    ///
    /// Returns `None` if the string has the wrong length or contains
    /// non-hex characters.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != FINGERPRINT_LEN * 2 || !hex.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; FINGERPRINT_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the first 8 bytes
        let hex = self.to_hex();
        write!(f, "Fingerprint({}…)", &hex[..16])
    }
}

/// Streaming SHA-512 hasher.
///
/// Holds no per-file state, so one instance can hash any number of files.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a hasher with a custom chunk size.
    ///
    /// A chunk size of zero is raised to one byte.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Chunk size used for reads, in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Compute the fingerprint of a file's full content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails
    /// partway through. Errors are never swallowed.
    pub fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(file).map_err(|e| HashError::from_io(path, e))
    }

    /// Compute the fingerprint of everything a reader yields.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than [`ErrorKind::Interrupted`],
    /// which is retried.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> std::io::Result<Fingerprint> {
        let mut digest = Sha512::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digest.update(&buffer[..read]);
        }

        let mut bytes = [0u8; FINGERPRINT_LEN];
        bytes.copy_from_slice(&digest.finalize());
        Ok(Fingerprint(bytes))
    }

    /// Compute the fingerprint of an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(data: &[u8]) -> Fingerprint {
        let mut bytes = [0u8; FINGERPRINT_LEN];
        bytes.copy_from_slice(&Sha512::digest(data));
        Fingerprint(bytes)
    }
}
