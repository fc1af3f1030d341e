//! Unaligned word access planning.
//!
//! This module splits a word read into the line-local pieces the cache
//! resolves, and reassembles the gathered bytes into a value:
//! 1. **Planning:** One span for a word inside a line, two for a word that
//!    crosses a line boundary.
//! 2. **Assembly:** Bytes gathered in address order become a little-endian value.

use std::ops::Range;

use crate::common::addr::LineAddr;
use crate::common::constants::{LINE_BYTES, WORD_BYTES};

/// The part of a word supplied by one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpan {
    /// Line holding the bytes and the offset of the first one.
    pub line: LineAddr,
    /// Number of bytes taken from the line.
    pub len: usize,
    /// Position of the first byte within the word.
    pub dest: usize,
}

impl LineSpan {
    /// Byte range within the line payload.
    pub const fn src(&self) -> Range<usize> {
        self.line.offset..self.line.offset + self.len
    }

    /// Byte range within the assembled word.
    pub const fn dst(&self) -> Range<usize> {
        self.dest..self.dest + self.len
    }
}

/// How a word read maps onto cache lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordPlan {
    /// Span in the line containing the start address.
    pub first: LineSpan,
    /// Span in the following line, present only for straddling reads.
    pub second: Option<LineSpan>,
}

impl WordPlan {
    /// Returns `true` if the word crosses a line boundary.
    pub const fn straddles(&self) -> bool {
        self.second.is_some()
    }

    /// Iterates over the spans in address order.
    pub fn spans(&self) -> impl Iterator<Item = LineSpan> {
        std::iter::once(self.first).chain(self.second)
    }
}

/// Returns `true` if `size` bytes at `addr` do not fit inside one line.
pub const fn crosses_line(addr: u64, size: usize) -> bool {
    LineAddr::decompose(addr).offset + size > LINE_BYTES
}

/// Plans a read of `WORD_BYTES` bytes at `addr`.
///
/// A straddling word takes `LINE_BYTES - offset` bytes from the tail of the
/// first line and the rest from the head of the next line.
pub const fn plan_word(addr: u64) -> WordPlan {
    let line = LineAddr::decompose(addr);
    if line.offset + WORD_BYTES <= LINE_BYTES {
        return WordPlan {
            first: LineSpan {
                line,
                len: WORD_BYTES,
                dest: 0,
            },
            second: None,
        };
    }

    let tail_len = LINE_BYTES - line.offset;
    WordPlan {
        first: LineSpan {
            line,
            len: tail_len,
            dest: 0,
        },
        second: Some(LineSpan {
            line: line.next_line(),
            len: WORD_BYTES - tail_len,
            dest: tail_len,
        }),
    }
}

/// Reassembles bytes gathered in address order.
///
/// Byte 0 becomes the least-significant byte of the result.
#[inline(always)]
pub const fn assemble_le(bytes: [u8; WORD_BYTES]) -> u64 {
    u64::from_le_bytes(bytes)
}
