//! Line address decomposition.
//!
//! This module splits raw 64-bit byte addresses into the two fields the cache
//! works with. It provides the following:
//! 1. **Decomposition:** `tag` (which 64-byte block) and `offset` (which byte in it).
//! 2. **Recomposition:** Rebuilding the byte address and the block base from the fields.
//! 3. **Neighbours:** Locating the block that follows, for reads that cross a line boundary.

use super::constants::{OFFSET_BITS, OFFSET_MASK};

/// A byte address split into line tag and line offset.
///
/// Every 64-bit value is a valid address; decomposition never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineAddr {
    /// Upper address bits identifying the 64-byte block.
    pub tag: u64,
    /// Byte index within the block, always `< LINE_BYTES`.
    pub offset: usize,
}

impl LineAddr {
    /// Splits `addr` into tag and offset.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw byte address.
    ///
    /// # Returns
    ///
    /// The `LineAddr` with `offset = addr & 0x3F` and `tag = addr >> 6`.
    #[inline(always)]
    pub const fn decompose(addr: u64) -> Self {
        Self {
            tag: addr >> OFFSET_BITS,
            offset: (addr & OFFSET_MASK) as usize,
        }
    }

    /// Rebuilds the original byte address.
    #[inline(always)]
    pub const fn compose(self) -> u64 {
        (self.tag << OFFSET_BITS) | self.offset as u64
    }

    /// Returns the address of the first byte of the block.
    #[inline(always)]
    pub const fn base(self) -> u64 {
        self.tag << OFFSET_BITS
    }

    /// Returns the first byte of the following block, wrapping at the top of
    /// the address space.
    pub const fn next_line(self) -> Self {
        Self {
            tag: self.tag.wrapping_add(1) & (u64::MAX >> OFFSET_BITS),
            offset: 0,
        }
    }
}

impl From<u64> for LineAddr {
    fn from(addr: u64) -> Self {
        Self::decompose(addr)
    }
}
