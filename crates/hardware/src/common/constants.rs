//! Global Cache Constants.
//!
//! This module defines the fixed geometry of the simulated cache. It includes:
//! 1. **Line Constants:** Line size, offset width, and offset mask.
//! 2. **Access Constants:** Width of the word returned by a read.
//! 3. **Organization Constants:** Number of sets (one, fully-associative).
//! 4. **Region Layout:** Byte footprint of the headers and lines inside the backing region.

/// Size of a cache line (block) in bytes.
pub const LINE_BYTES: usize = 64;

/// Number of low address bits selecting a byte within a line (`log2(LINE_BYTES)`).
pub const OFFSET_BITS: u32 = LINE_BYTES.trailing_zeros();

/// Mask for extracting the line offset from an address.
pub const OFFSET_MASK: u64 = (1 << OFFSET_BITS) - 1;

/// Width in bytes of the word returned by a cache read.
pub const WORD_BYTES: usize = 8;

/// Number of sets. A single set makes the cache fully associative.
pub const NUM_SETS: usize = 1;

/// Bytes reserved at the start of the region for the cache state header
/// (initialized flag plus the set table reference).
pub const STATE_HEADER_BYTES: usize = 16;

/// Bytes reserved per set header (the line table reference).
pub const SET_HEADER_BYTES: usize = 8;

/// Bytes occupied by one line: recency rank, valid flag, tag, and payload.
pub const LINE_FOOTPRINT_BYTES: usize = 4 + 4 + 8 + LINE_BYTES;
