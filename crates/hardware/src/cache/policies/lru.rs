//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! It maintains a usage stack for each set. When a line is accessed, it is moved
//! to the top (Most Recently Used position), and every line that was more recent
//! shifts down by one. The bottom of the stack is the Least Recently Used line.
//!
//! A way's position in its stack is its recency rank, so the ranks in a set are
//! always a permutation of `0..ways` and the victim is the single way with the
//! largest rank.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruPolicy {
    /// A vector of usage stacks (one per set).
    /// Index 0 is MRU, last index is LRU.
    usage: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// Way `i` starts with recency rank `i`, so the last way is the first victim.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
        }
    }

    /// Returns the usage stack of `set`, most recent way first.
    pub fn order(&self, set: usize) -> &[usize] {
        &self.usage[set]
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves `way` to the MRU position.
    ///
    /// Ways that were more recent than `way` shift down one place; less
    /// recent ways keep their rank.
    fn update(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack[..=pos].rotate_right(1);
        }
    }

    /// Returns the way at the bottom of the usage stack (LRU position).
    fn get_victim(&mut self, set: usize) -> usize {
        self.usage[set].last().copied().unwrap_or_default()
    }

    fn recency(&self, set: usize, way: usize) -> usize {
        self.usage[set]
            .iter()
            .position(|&x| x == way)
            .unwrap_or(self.usage[set].len())
    }
}
