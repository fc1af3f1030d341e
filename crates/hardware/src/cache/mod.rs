//! Fully-Associative Line Cache.
//!
//! This module implements the cache read path. It provides:
//! 1. **Lazy Layout:** Lines are sized from the backing region on the first read.
//! 2. **Lookup:** Associative tag search across the single set.
//! 3. **Replacement:** LRU promotion on hit and victim selection on miss.
//! 4. **Word Reads:** 8-byte reads, including words that straddle two lines.
//!
//! There is no write path; lines are only ever filled from the backing store.

/// Cache replacement policy implementations.
pub mod policies;

/// Cache lines and sets.
pub mod set;

/// Word-to-line span planning for unaligned reads.
pub mod unaligned;

use tracing::{debug, trace, warn};

use self::policies::{LruPolicy, ReplacementPolicy};
use self::set::CacheSet;
use self::unaligned::LineSpan;
use crate::common::addr::LineAddr;
use crate::common::constants::{LINE_BYTES, WORD_BYTES};
use crate::common::error::CacheError;
use crate::config::{BackingRegion, CacheConfig, Geometry};
use crate::memory::BackingStore;
use crate::stats::CacheStats;

/// Snapshot of one line, for inspection and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineView {
    /// Set the line belongs to.
    pub set: usize,
    /// Way index within the set.
    pub way: usize,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Block identifier (meaningful only when `valid`).
    pub tag: u64,
    /// Recency rank, `0` being most recently used.
    pub recency: usize,
}

/// Line storage and replacement state, built on first use.
#[derive(Debug)]
struct CacheState {
    geometry: Geometry,
    sets: Vec<CacheSet>,
    policy: LruPolicy,
}

impl CacheState {
    fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            sets: (0..geometry.num_sets)
                .map(|_| CacheSet::new(geometry.num_lines))
                .collect(),
            policy: LruPolicy::new(geometry.num_sets, geometry.num_lines),
        }
    }

    #[inline(always)]
    const fn set_index(&self, tag: u64) -> usize {
        (tag % self.geometry.num_sets as u64) as usize
    }

    /// Probes for `span`'s line. On a hit, promotes it and copies its bytes into `word`.
    fn lookup(&mut self, span: LineSpan, word: &mut [u8; WORD_BYTES]) -> bool {
        let set = self.set_index(span.line.tag);
        let Some(way) = self.sets[set].find_by_tag(span.line.tag) else {
            return false;
        };
        trace!(tag = span.line.tag, set, way, "cache hit");
        self.policy.update(set, way);
        word[span.dst()].copy_from_slice(self.sets[set].line(way).bytes(span.src()));
        true
    }

    /// Evicts the LRU line of `span`'s set, refills it from `store`, and copies
    /// the span's bytes into `word`.
    ///
    /// The victim is promoted and retagged before the fetch. If the fetch
    /// faults the victim is left invalid.
    fn fill<S: BackingStore>(
        &mut self,
        span: LineSpan,
        store: &mut S,
        stats: &mut CacheStats,
        word: &mut [u8; WORD_BYTES],
    ) -> Result<(), CacheError> {
        let tag = span.line.tag;
        let set = self.set_index(tag);
        let way = self.policy.get_victim(set);
        self.policy.update(set, way);

        let line = self.sets[set].line_mut(way);
        if line.valid {
            stats.evictions += 1;
            trace!(old_tag = line.tag, new_tag = tag, set, way, "evicting line");
        } else {
            trace!(tag, set, way, "cache miss into free line");
        }
        line.tag = tag;
        line.valid = false;

        let base = span.line.base();
        let mut block = [0u8; LINE_BYTES];
        if let Err(fault) = store.fetch(base, &mut block) {
            stats.fetch_faults += 1;
            warn!(addr = base, %fault, "backing store fetch failed");
            return Err(CacheError::BackingStoreUnavailable { addr: base });
        }

        line.data = block;
        line.valid = true;
        word[span.dst()].copy_from_slice(line.bytes(span.src()));
        Ok(())
    }
}

/// Fully-associative cache of 64-byte lines with LRU replacement.
///
/// The cache owns its backing store and is sized lazily from `region` on the
/// first read. It is single-threaded: wrap it in a `Mutex` to share it.
#[derive(Debug)]
pub struct Cache<S, R = CacheConfig> {
    region: R,
    store: S,
    state: Option<CacheState>,
    stats: CacheStats,
}

impl<S: BackingStore, R: BackingRegion> Cache<S, R> {
    /// Creates an uninitialized cache over `store`, to be laid out in `region`.
    ///
    /// The region is not consulted until the first read.
    pub const fn new(region: R, store: S) -> Self {
        Self {
            region,
            store,
            state: None,
            stats: CacheStats {
                reads: 0,
                straddles: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
                fetch_faults: 0,
            },
        }
    }

    /// Lays out the lines if this is the first use.
    ///
    /// Every line starts invalid, with recency rank equal to its way index.
    /// Later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::RegionTooSmall`] if the region cannot hold one
    /// line. The cache stays uninitialized in that case.
    pub fn init(&mut self) -> Result<(), CacheError> {
        let _ = Self::state_mut(&mut self.state, &self.region)?;
        Ok(())
    }

    fn state_mut<'a>(
        slot: &'a mut Option<CacheState>,
        region: &R,
    ) -> Result<&'a mut CacheState, CacheError> {
        let state = if let Some(state) = slot.take() {
            state
        } else {
            let region_bytes = region.size_bytes();
            let geometry = Geometry::from_region(region_bytes)?;
            debug!(
                region_bytes,
                num_sets = geometry.num_sets,
                num_lines = geometry.num_lines,
                "cache laid out"
            );
            CacheState::new(geometry)
        };
        Ok(slot.insert(state))
    }

    /// Reads the 8-byte little-endian word at `addr`.
    ///
    /// Each line the word touches is resolved in turn: a hit promotes the
    /// line to most recently used, a miss evicts the least recently used
    /// line and refills it from the backing store. A word that crosses a
    /// line boundary probes both lines before filling either, so a hit on
    /// one half is never evicted by the fill of the other.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::BackingStoreUnavailable`] if a needed line
    /// cannot be fetched. For a straddling read, a half that was already
    /// filled stays cached. Returns [`CacheError::RegionTooSmall`] if the
    /// cache cannot be laid out.
    pub fn read(&mut self, addr: u64) -> Result<u64, CacheError> {
        let state = Self::state_mut(&mut self.state, &self.region)?;
        let plan = unaligned::plan_word(addr);
        self.stats.reads += 1;
        if plan.straddles() {
            self.stats.straddles += 1;
        }

        let mut word = [0u8; WORD_BYTES];
        let first_miss = (!state.lookup(plan.first, &mut word)).then_some(plan.first);
        let second_miss = plan.second.filter(|&span| !state.lookup(span, &mut word));

        let lookups = 1 + u64::from(plan.straddles());
        let misses = first_miss.iter().chain(&second_miss).count() as u64;
        self.stats.hits += lookups - misses;
        self.stats.misses += misses;

        for span in first_miss.into_iter().chain(second_miss) {
            state.fill(span, &mut self.store, &mut self.stats, &mut word)?;
        }

        Ok(unaligned::assemble_le(word))
    }

    /// Reads the word at `addr`, returning `None` if the read fails.
    pub fn get(&mut self, addr: u64) -> Option<u64> {
        self.read(addr).ok()
    }

    /// Returns `true` if the line containing `addr` is cached.
    ///
    /// Does not update recency.
    pub fn contains(&self, addr: u64) -> bool {
        let line = LineAddr::decompose(addr);
        self.state.as_ref().is_some_and(|state| {
            state.sets[state.set_index(line.tag)]
                .find_by_tag(line.tag)
                .is_some()
        })
    }

    /// Returns a snapshot of every line, in set then way order.
    ///
    /// Empty before initialization.
    pub fn lines(&self) -> Vec<LineView> {
        let Some(state) = &self.state else {
            return Vec::new();
        };
        state
            .sets
            .iter()
            .enumerate()
            .flat_map(|(set, lines)| {
                lines.into_iter().enumerate().map(move |(way, line)| LineView {
                    set,
                    way,
                    valid: line.valid,
                    tag: line.tag,
                    recency: state.policy.recency(set, way),
                })
            })
            .collect()
    }

    /// Returns `true` once the lines have been laid out.
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Number of lines per set, or `None` before initialization.
    pub fn num_lines(&self) -> Option<usize> {
        self.state.as_ref().map(|state| state.geometry.num_lines)
    }

    /// Returns the counters accumulated since creation or the last reset.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Clears the counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Returns the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store for modification.
    ///
    /// Changes to bytes that are already cached are not seen until their
    /// line is evicted and refilled.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the region descriptor.
    pub const fn region(&self) -> &R {
        &self.region
    }
}
