//! Cache Entry Module
//!
//! Defines the structure of individual cache entries with TTL metadata.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::policy::PERMANENT_THRESHOLD;

// == Cache Entry ==
/// A single cache entry: an opaque JSON payload plus expiry metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Lifetime assigned at write time, in milliseconds
    pub ttl_ms: u64,
    /// True when the TTL crossed the permanent threshold; permanent
    /// entries are never swept and never expire on read
    pub permanent: bool,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Value, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: current_timestamp_ms(),
            ttl_ms: ttl.as_millis() as u64,
            permanent: ttl >= PERMANENT_THRESHOLD,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's logical lifetime has elapsed.
    ///
    /// An entry is live iff `now < stored_at + ttl_ms`. Permanent entries
    /// never expire regardless of elapsed time.
    pub fn is_expired(&self) -> bool {
        if self.permanent {
            return false;
        }
        current_timestamp_ms() >= self.stored_at.saturating_add(self.ttl_ms)
    }

    /// Returns remaining lifetime in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        let expires_at = self.stored_at.saturating_add(self.ttl_ms);
        expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
