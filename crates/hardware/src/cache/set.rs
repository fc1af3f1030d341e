//! Cache lines and sets.
//!
//! A set owns a fixed number of lines. Lines are never created or destroyed
//! after the set is built; eviction overwrites their tag, validity and payload.

use std::ops::Range;

use crate::common::constants::LINE_BYTES;

/// One 64-byte cache line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    /// Block identifier of the cached bytes.
    pub tag: u64,
    /// Whether `data` holds the block named by `tag`.
    pub valid: bool,
    /// Cached bytes of the block, in address order.
    pub data: [u8; LINE_BYTES],
}

impl Default for CacheLine {
    fn default() -> Self {
        Self {
            tag: 0,
            valid: false,
            data: [0; LINE_BYTES],
        }
    }
}

impl CacheLine {
    /// Returns `true` if this line currently holds block `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Returns the payload bytes in `range`.
    pub fn bytes(&self, range: Range<usize>) -> &[u8] {
        &self.data[range]
    }
}

/// A set of lines searched associatively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// Returns the way of the first valid line holding `tag`.
    ///
    /// Valid tags are unique within a set, so at most one way can match.
    pub fn find_by_tag(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    /// Returns the line at `way`.
    pub fn line(&self, way: usize) -> &CacheLine {
        &self.lines[way]
    }

    /// Returns the line at `way` for modification.
    pub fn line_mut(&mut self, way: usize) -> &mut CacheLine {
        &mut self.lines[way]
    }

    /// Iterates over the lines in way order.
    pub fn iter(&self) -> std::slice::Iter<'_, CacheLine> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a CacheSet {
    type Item = &'a CacheLine;
    type IntoIter = std::slice::Iter<'a, CacheLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
