//! Cache Statistics Module
//!
//! Aggregate view over the store's current entries. Always computed from a
//! live scan, never cached independently.

use serde::Serialize;

use crate::cache::CacheEntry;

// == Cache Stats ==
/// Aggregate statistics for the persistent cache store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Approximate total payload size in bytes (serialized JSON)
    pub approx_bytes: usize,
    /// Number of permanent entries
    pub permanent: usize,
    /// Number of temporary (sweepable) entries
    pub temporary: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Observe ==
    /// Folds one entry into the aggregate during a scan.
    pub fn observe(&mut self, entry: &CacheEntry) {
        self.entries += 1;
        self.approx_bytes += serde_json::to_vec(&entry.value)
            .map(|bytes| bytes.len())
            .unwrap_or(0);
        if entry.permanent {
            self.permanent += 1;
        } else {
            self.temporary += 1;
        }
    }
}
