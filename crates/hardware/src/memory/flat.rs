//! Flat Memory Implementation.
//!
//! A contiguous byte buffer mapped at a base address. Fetches that fall
//! outside `[base, base + len)` fault, which is how callers model an
//! unavailable backing store.

use super::BackingStore;
use crate::common::error::FetchFault;

/// Contiguous byte-addressable memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatMemory {
    data: Vec<u8>,
    base: u64,
}

impl FlatMemory {
    /// Creates a zero-filled memory of `size` bytes mapped at `base`.
    pub fn new(size: usize, base: u64) -> Self {
        Self {
            data: vec![0; size],
            base,
        }
    }

    /// Wraps existing bytes, mapping the first byte at `base`.
    pub const fn from_bytes(data: Vec<u8>, base: u64) -> Self {
        Self { data, base }
    }

    /// Returns the backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copies `data` into memory starting at absolute address `addr`.
    ///
    /// Writes that do not fit entirely inside the mapped range are ignored.
    pub fn load(&mut self, addr: u64, data: &[u8]) {
        if let Some(range) = self.index_range(addr, data.len()) {
            self.data[range].copy_from_slice(data);
        }
    }

    /// Stores `val` little-endian at absolute address `addr`.
    pub fn write_u64(&mut self, addr: u64, val: u64) {
        self.load(addr, &val.to_le_bytes());
    }

    fn index_range(&self, addr: u64, len: usize) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(addr.checked_sub(self.base)?).ok()?;
        let end = start.checked_add(len)?;
        (end <= self.data.len()).then_some(start..end)
    }
}

impl BackingStore for FlatMemory {
    fn fetch(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), FetchFault> {
        let range = self.index_range(addr, buf.len()).ok_or(FetchFault {
            addr,
            len: buf.len(),
        })?;
        buf.copy_from_slice(&self.data[range]);
        Ok(())
    }
}
