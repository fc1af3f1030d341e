//! Configuration system for the cache model.
//!
//! This module defines the configuration consumed by the cache. It provides:
//! 1. **Defaults:** Baseline region size when none is supplied.
//! 2. **Structures:** `CacheConfig`, deserialized from JSON.
//! 3. **Region Descriptor:** The `BackingRegion` trait the lazy initializer sizes the cache from.
//!
//! Configuration is supplied as JSON text or a JSON file, or use `CacheConfig::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{
    LINE_FOOTPRINT_BYTES, NUM_SETS, SET_HEADER_BYTES, STATE_HEADER_BYTES,
};
use crate::common::error::{CacheError, ConfigError};

/// Default configuration constants for the cache.
mod defaults {
    /// Default backing region size in bytes (4 KiB).
    ///
    /// Holds the headers plus 50 lines.
    pub const REGION_BYTES: usize = 4096;
}

/// Descriptor of the memory region the cache lays its lines out in.
///
/// The lazy initializer consults the region exactly once, on the first read,
/// to decide how many lines the cache holds.
pub trait BackingRegion {
    /// Returns the size of the region in bytes.
    fn size_bytes(&self) -> usize;
}

/// Geometry derived from a region size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Number of sets (always one for this cache).
    pub num_sets: usize,
    /// Lines per set.
    pub num_lines: usize,
}

impl Geometry {
    /// Computes the geometry for a region of `region_bytes`.
    ///
    /// `num_lines = (region - state header - set headers) / line footprint`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::RegionTooSmall`] when fewer than one line fits.
    pub const fn from_region(region_bytes: usize) -> Result<Self, CacheError> {
        let overhead = STATE_HEADER_BYTES + SET_HEADER_BYTES * NUM_SETS;
        let required = Self::region_bytes_for(1);
        if region_bytes < required {
            return Err(CacheError::RegionTooSmall {
                region_bytes,
                required,
            });
        }
        Ok(Self {
            num_sets: NUM_SETS,
            num_lines: (region_bytes - overhead) / LINE_FOOTPRINT_BYTES,
        })
    }

    /// Returns the smallest region size that yields `num_lines` lines.
    pub const fn region_bytes_for(num_lines: usize) -> usize {
        STATE_HEADER_BYTES + SET_HEADER_BYTES * NUM_SETS + LINE_FOOTPRINT_BYTES * num_lines
    }
}

/// Cache configuration.
///
/// Sizes the backing region the cache is laid out in. Line size and
/// associativity are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Size of the backing region in bytes.
    #[serde(default = "CacheConfig::default_region_bytes")]
    pub region_bytes: usize,
}

impl CacheConfig {
    /// Returns the default region size in bytes.
    const fn default_region_bytes() -> usize {
        defaults::REGION_BYTES
    }

    /// Builds a configuration whose region holds exactly `num_lines` lines.
    pub const fn with_lines(num_lines: usize) -> Self {
        Self {
            region_bytes: Geometry::region_bytes_for(num_lines),
        }
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that the region holds at least one line.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::RegionTooSmall`] when it does not.
    pub const fn validate(&self) -> Result<Geometry, CacheError> {
        Geometry::from_region(self.region_bytes)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            region_bytes: defaults::REGION_BYTES,
        }
    }
}

impl BackingRegion for CacheConfig {
    fn size_bytes(&self) -> usize {
        self.region_bytes
    }
}
