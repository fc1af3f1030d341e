//! Cache (`Cache`) Unit Tests.
//!
//! Verifies hit/miss logic, LRU eviction order, read-after-fill consistency,
//! and the recency permutation invariant of the fully-associative cache.
//!
//! Caches are built over patterned memory, so every expected value can be
//! assembled by hand from `pattern_byte`.

use linecache_core::{Cache, CacheConfig, FlatMemory};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::harness::{MEMORY_BYTES, expected_word, patterned_cache, patterned_memory};

// ══════════════════════════════════════════════════════════
// 1. Cold Miss / Warm Hit
// ══════════════════════════════════════════════════════════

/// First access to any address is a compulsory miss that fetches one line.
#[test]
fn cold_miss_fetches_the_line() {
    let mut cache = patterned_cache(4);

    assert_eq!(cache.read(0x1008), Ok(expected_word(0x1008)));
    assert_eq!(cache.store().fetches(), &[0x1000]);
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 0);
    assert!(cache.contains(0x1000));
}

/// Second access to the same word hits without touching memory.
#[test]
fn warm_hit_does_not_fetch() {
    let mut cache = patterned_cache(4);

    let first = cache.read(0x1000);
    let second = cache.read(0x1000);
    assert_eq!(first, second);
    assert_eq!(cache.store().fetches().len(), 1);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.stats().misses, 1);
}

/// Any aligned word of a filled line hits.
#[test]
fn same_line_different_offset_hits() {
    let mut cache = patterned_cache(4);

    assert_eq!(cache.read(0x1000), Ok(expected_word(0x1000)));
    assert_eq!(cache.read(0x1000 + 32), Ok(expected_word(0x1020)));
    assert_eq!(cache.read(0x1000 + 56), Ok(expected_word(0x1038)));
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 2);
}

/// `get` is the success/value form of `read`.
#[test]
fn get_returns_value_on_success() {
    let mut cache = patterned_cache(2);
    assert_eq!(cache.get(0x200), Some(expected_word(0x200)));
}

// ══════════════════════════════════════════════════════════
// 2. Endianness
// ══════════════════════════════════════════════════════════

/// Byte 0 of the word in memory is the least-significant byte of the value.
#[test]
fn aligned_read_reconstructs_little_endian() {
    let mut mem = FlatMemory::new(256, 0);
    mem.load(0x48, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    let mut cache = Cache::new(CacheConfig::with_lines(2), mem);

    assert_eq!(cache.read(0x48), Ok(0x0807_0605_0403_0201));
}

#[test]
fn written_pattern_reads_back() {
    let mut mem = FlatMemory::new(256, 0);
    mem.write_u64(0x80, 0xDEAD_BEEF_CAFE_F00D);
    let mut cache = Cache::new(CacheConfig::with_lines(2), mem);

    assert_eq!(cache.read(0x80), Ok(0xDEAD_BEEF_CAFE_F00D));
}

// ══════════════════════════════════════════════════════════
// 3. LRU Eviction Order
// ══════════════════════════════════════════════════════════

/// With two lines: T1, T2, T1 (refresh), T3 must evict T2, not T1.
#[test]
fn refreshed_line_survives_eviction() {
    let mut cache = patterned_cache(2);
    let (t1, t2, t3) = (0x000, 0x040, 0x080);

    assert!(cache.read(t1).is_ok());
    assert!(cache.read(t2).is_ok());
    assert!(cache.read(t1).is_ok());
    assert!(cache.read(t3).is_ok());

    assert!(cache.contains(t1), "recently refreshed line should survive");
    assert!(!cache.contains(t2), "least recently used line should be evicted");
    assert!(cache.contains(t3), "newly filled line should be present");
    assert_eq!(cache.stats().evictions, 1);
}

/// N+1 distinct lines with N ways evict the first one filled.
#[test]
fn capacity_miss_evicts_oldest_fill() {
    let mut cache = patterned_cache(4);
    for line in 0..5u64 {
        assert!(cache.read(line * 64).is_ok());
    }

    assert!(!cache.contains(0));
    for line in 1..5u64 {
        assert!(cache.contains(line * 64));
    }
    assert_eq!(cache.stats().evictions, 1);

    // The evicted line misses again.
    assert_eq!(cache.read(0), Ok(expected_word(0)));
    assert_eq!(cache.store().fetches().last(), Some(&0));
}

/// Fills use free lines in descending way order, since way i starts with rank i.
#[test]
fn fills_take_highest_ranked_free_line() {
    let mut cache = patterned_cache(3);
    assert!(cache.read(0x000).is_ok());
    assert!(cache.read(0x040).is_ok());

    let lines = cache.lines();
    assert_eq!(lines[2].tag, 0);
    assert!(lines[2].valid);
    assert_eq!(lines[1].tag, 1);
    assert!(lines[1].valid);
    assert!(!lines[0].valid);
    assert_eq!(cache.stats().evictions, 0);
}

/// `contains` is a pure probe and does not refresh recency.
#[test]
fn contains_does_not_refresh() {
    let mut cache = patterned_cache(2);
    assert!(cache.read(0x000).is_ok());
    assert!(cache.read(0x040).is_ok());

    assert!(cache.contains(0x000));
    assert!(cache.read(0x080).is_ok());
    assert!(!cache.contains(0x000));
}

// ══════════════════════════════════════════════════════════
// 4. Stale Data
// ══════════════════════════════════════════════════════════

/// Cached lines are not refreshed when memory changes behind the cache.
#[test]
fn cached_line_hides_memory_update_until_evicted() {
    let mut cache = Cache::new(CacheConfig::with_lines(1), patterned_memory(MEMORY_BYTES));
    let before = cache.read(0x100);
    assert_eq!(before, Ok(expected_word(0x100)));

    cache.store_mut().write_u64(0x100, 42);
    assert_eq!(cache.read(0x100), before);

    // Evict by reading another line, then refill.
    assert!(cache.read(0x200).is_ok());
    assert_eq!(cache.read(0x100), Ok(42));
}

// ══════════════════════════════════════════════════════════
// 5. Statistics
// ══════════════════════════════════════════════════════════

#[test]
fn reset_stats_clears_counters_but_not_lines() {
    let mut cache = patterned_cache(2);
    assert!(cache.read(0).is_ok());
    cache.reset_stats();

    assert_eq!(cache.stats().reads, 0);
    assert!(cache.contains(0));
    assert!(cache.read(0).is_ok());
    assert_eq!(cache.stats().hits, 1);
}

// ══════════════════════════════════════════════════════════
// 6. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    /// After a successful fill, rereading the word hits and returns the same value.
    #[test]
    fn read_after_fill_is_consistent(addr in 0u64..(MEMORY_BYTES as u64 - 8)) {
        let mut cache = patterned_cache(4);
        let first = cache.read(addr);
        prop_assert_eq!(first.clone(), Ok(expected_word(addr)));

        let misses = cache.stats().misses;
        prop_assert_eq!(cache.read(addr), first);
        prop_assert_eq!(cache.stats().misses, misses);
    }

    /// Recency ranks stay a permutation and valid tags stay unique under any reads.
    #[test]
    fn recency_and_tag_invariants_hold(
        ways in 1usize..6,
        addrs in prop::collection::vec(0u64..1024, 1..48),
    ) {
        let mut cache = patterned_cache(ways);
        for addr in addrs {
            prop_assert_eq!(cache.read(addr), Ok(expected_word(addr)));

            let lines = cache.lines();
            let mut ranks: Vec<usize> = lines.iter().map(|l| l.recency).collect();
            ranks.sort_unstable();
            prop_assert_eq!(ranks, (0..ways).collect::<Vec<_>>());

            let mut tags: Vec<u64> = lines.iter().filter(|l| l.valid).map(|l| l.tag).collect();
            let valid = tags.len();
            tags.sort_unstable();
            tags.dedup();
            prop_assert_eq!(tags.len(), valid);
        }
    }
}
