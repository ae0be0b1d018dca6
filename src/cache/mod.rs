//! Cache Module
//!
//! The adaptive persistent cache: content-age-driven TTL policy, the
//! disk-backed store, and scan-derived statistics.

mod entry;
pub mod policy;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
