//! Common types and constants used throughout the cache model.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Types:** Decomposition of byte addresses into tag and offset.
//! 2. **Constants:** Line geometry and backing-region layout.
//! 3. **Error Handling:** Fetch faults, cache errors, and configuration errors.

/// Address decomposition into line tag and offset.
pub mod addr;

/// Line geometry and region layout constants.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::LineAddr;
pub use constants::{LINE_BYTES, OFFSET_BITS, WORD_BYTES};
pub use error::{CacheError, ConfigError, FetchFault};
