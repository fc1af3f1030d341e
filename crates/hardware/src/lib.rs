//! Fully-associative cache model.
//!
//! This crate simulates one hardware cache between a requester and a slower
//! backing store, with the following:
//! 1. **Cache:** 64-byte lines, a single fully-associative set, LRU replacement.
//! 2. **Reads:** 8-byte little-endian words, including words that straddle two lines.
//! 3. **Memory:** The `BackingStore` fetch capability and a flat `Vec`-backed store.
//! 4. **Configuration:** JSON-loadable region size that determines the line count.
//! 5. **Statistics:** Hit, miss, eviction, and fault counters.
//!
//! ```
//! use linecache_core::{Cache, CacheConfig, FlatMemory};
//!
//! let mut memory = FlatMemory::new(4096, 0);
//! memory.write_u64(0x40, 0x1122_3344_5566_7788);
//!
//! let mut cache = Cache::new(CacheConfig::with_lines(4), memory);
//! assert_eq!(cache.read(0x40), Ok(0x1122_3344_5566_7788));
//! assert_eq!(cache.stats().misses, 1);
//! ```

/// Fully-associative cache, replacement policies, and unaligned read planning.
pub mod cache;
/// Common types and constants (address decomposition, geometry, errors).
pub mod common;
/// Cache configuration and the backing region descriptor.
pub mod config;
/// Backing store capability and flat memory.
pub mod memory;
/// Cache statistics collection and reporting.
pub mod stats;

/// Main cache type; construct with `Cache::new` and read with `Cache::read`.
pub use crate::cache::Cache;
/// Error returned by a failed read.
pub use crate::common::error::CacheError;
/// Configuration type; use `CacheConfig::default()` or load it from JSON.
pub use crate::config::CacheConfig;
/// Flat byte-addressable backing store.
pub use crate::memory::{BackingStore, FlatMemory};
