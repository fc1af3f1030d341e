//! Cache statistics collection and reporting.
//!
//! This module tracks what the cache did while answering reads. It provides:
//! 1. **Access counts:** Reads issued and how many of them straddled two lines.
//! 2. **Line resolution:** Hits and misses, counted once per line touched.
//! 3. **Replacement:** Evictions of valid lines and failed backing-store fetches.

use std::fmt;

/// Counters updated by every cache read.
///
/// A straddling read resolves two lines, so it contributes two hit/miss events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of `read` calls.
    pub reads: u64,
    /// Reads whose word spanned two lines.
    pub straddles: u64,
    /// Line lookups that found a valid matching line.
    pub hits: u64,
    /// Line lookups that had to fill a line from the backing store.
    pub misses: u64,
    /// Misses whose victim held a valid line.
    pub evictions: u64,
    /// Fills that failed because the backing store faulted.
    pub fetch_faults: u64,
}

impl CacheStats {
    /// Total line lookups (hits plus misses).
    pub const fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage of line lookups, `0.0` when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total > 0 {
            100.0 * (self.hits as f64 / total as f64)
        } else {
            0.0
        }
    }

    /// Prints the statistics block to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE")?;
        writeln!(f, "  cache.reads            {}", self.reads)?;
        writeln!(f, "  cache.straddles        {}", self.straddles)?;
        writeln!(
            f,
            "  cache.lookups          {:<10} | hits: {:<10} | miss_rate: {:.2}%",
            self.lookups(),
            self.hits,
            if self.lookups() > 0 { 100.0 - self.hit_rate() } else { 0.0 }
        )?;
        writeln!(f, "  cache.evictions        {}", self.evictions)?;
        writeln!(f, "  cache.fetch_faults     {}", self.fetch_faults)?;
        write!(f, "==========================================================")
    }
}
