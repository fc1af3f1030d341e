//! Cache and configuration error definitions.
//!
//! This module defines the error types surfaced by the cache. It provides:
//! 1. **Fetch Faults:** Reported by a backing store that cannot supply a block.
//! 2. **Cache Errors:** The outcome of a failed read, or of an unusable region.
//! 3. **Configuration Errors:** Failures while loading or parsing configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A backing-store fetch that could not be satisfied.
///
/// Stores return this from [`BackingStore::fetch`](crate::memory::BackingStore::fetch)
/// when any byte of the requested range is outside their addressable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("fetch of {len} bytes at {addr:#x} failed")]
pub struct FetchFault {
    /// First byte of the requested range.
    pub addr: u64,
    /// Number of bytes requested.
    pub len: usize,
}

/// Errors reported by [`Cache`](crate::cache::Cache).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The backing store failed to supply the line starting at `addr`.
    ///
    /// No value is produced. The cause of the fault is not distinguished further.
    #[error("backing store unavailable for line at {addr:#x}")]
    BackingStoreUnavailable {
        /// Base address of the line that could not be filled.
        addr: u64,
    },

    /// The configured region cannot hold the headers plus a single line.
    #[error("cache region of {region_bytes} bytes is too small, need at least {required}")]
    RegionTooSmall {
        /// Configured region size in bytes.
        region_bytes: usize,
        /// Minimum region size that holds one line.
        required: usize,
    },
}

impl From<FetchFault> for CacheError {
    fn from(fault: FetchFault) -> Self {
        Self::BackingStoreUnavailable { addr: fault.addr }
    }
}

/// Errors raised while loading a [`CacheConfig`](crate::config::CacheConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON for the schema.
    #[error("invalid cache config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an unusable cache.
    #[error(transparent)]
    Invalid(#[from] CacheError),
}
