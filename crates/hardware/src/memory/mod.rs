//! Backing Store Interface.
//!
//! This module defines the slower memory the cache reads through. It provides:
//! 1. **Capability:** The `BackingStore` trait, a synchronous block `fetch`.
//! 2. **Flat Memory:** `FlatMemory`, a byte-addressable `Vec`-backed store mapped at a base address.
//!
//! The cache never writes back; stores only need to supply bytes.

/// `Vec`-backed byte-addressable memory.
pub mod flat;

pub use flat::FlatMemory;

use crate::common::error::FetchFault;

/// Byte-addressable memory consulted by the cache on a miss.
///
/// Fetches complete synchronously: they either fill the whole buffer or fail.
pub trait BackingStore {
    /// Copies `buf.len()` bytes starting at `addr` into `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFault`] if any byte of the range is not addressable.
    /// The contents of `buf` are unspecified after a fault.
    fn fetch(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), FetchFault>;
}

impl<S: BackingStore + ?Sized> BackingStore for &mut S {
    fn fetch(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), FetchFault> {
        (**self).fetch(addr, buf)
    }
}

impl<S: BackingStore + ?Sized> BackingStore for Box<S> {
    fn fetch(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), FetchFault> {
        (**self).fetch(addr, buf)
    }
}
