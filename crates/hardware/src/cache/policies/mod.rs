//! Cache Replacement Policies.
//!
//! Selects victim lines within a set and tracks how recently each way was used.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, kept as an explicit recency stack per set.

/// Least Recently Used replacement policy.
pub mod lru;

pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync {
    /// Updates the policy state when a line is accessed or filled.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Returns the recency rank of `way` in `set`, where `0` is most recently used.
    ///
    /// Across one set the ranks form a permutation of `0..ways`.
    fn recency(&self, set: usize, way: usize) -> usize;
}
