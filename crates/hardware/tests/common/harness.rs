use linecache_core::common::constants::WORD_BYTES;
use linecache_core::{Cache, CacheConfig, FlatMemory};
use tracing_subscriber::EnvFilter;

use crate::common::mocks::memory::MockMemory;

/// Size of the patterned test memory, mapped at address 0.
pub const MEMORY_BYTES: usize = 16 * 1024;

/// Installs a test-friendly tracing subscriber once per process.
///
/// Set `RUST_LOG=linecache_core=trace` to see hits, misses, and evictions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Byte stored at `addr` in patterned memory.
///
/// 251 is prime, so consecutive bytes within any 64-byte line differ.
pub fn pattern_byte(addr: u64) -> u8 {
    (addr % 251) as u8
}

/// Memory of `size` bytes at address 0 filled with `pattern_byte`.
pub fn patterned_memory(size: usize) -> FlatMemory {
    FlatMemory::from_bytes((0..size as u64).map(pattern_byte).collect(), 0)
}

/// The word a correct cache returns at `addr` from patterned memory,
/// assembled by hand with byte 0 least significant.
pub fn expected_word(addr: u64) -> u64 {
    (0..WORD_BYTES as u64).fold(0, |acc, i| {
        acc | (u64::from(pattern_byte(addr.wrapping_add(i))) << (8 * i))
    })
}

/// A cache of `num_lines` lines over fault-injectable patterned memory.
pub fn patterned_cache(num_lines: usize) -> Cache<MockMemory> {
    init_tracing();
    Cache::new(
        CacheConfig::with_lines(num_lines),
        MockMemory::new(patterned_memory(MEMORY_BYTES)),
    )
}
