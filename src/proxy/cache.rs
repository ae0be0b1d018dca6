//! Proxy Cache Module
//!
//! Short-lived in-memory cache in front of outbound upstream calls, keyed
//! by request signature. Entries are small and short-lived, so eviction is
//! lazy on read rather than swept by a timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

// == Proxy TTLs ==
/// Default lifetime for upstream responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
/// Lifetime for post listings, the most volatile category.
pub const POSTS_TTL: Duration = Duration::from_secs(2 * 60);
/// Lifetime for category listings, which rarely change.
pub const CATEGORIES_TTL: Duration = Duration::from_secs(30 * 60);

// == Proxy Entry ==
#[derive(Debug)]
struct ProxyEntry {
    /// Raw upstream JSON response
    data: Value,
    /// Absolute expiry deadline
    expires_at: Instant,
}

// == Proxy Cache ==
/// Thread-safe request-signature cache with lazy expiry.
#[derive(Debug, Default)]
pub struct ProxyCache {
    entries: DashMap<String, ProxyEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ProxyCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the cached response if still fresh. An entry observed past
    /// its deadline is evicted on the spot and counts as a miss; staleness
    /// is binary, there is no stale-but-served state.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if Instant::now() < entry.expires_at {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.data.clone());
            }
            // Release the shard lock before removing.
            drop(entry);
            self.entries.remove(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    // == Set ==
    /// Stores a response unconditionally, overwriting any previous entry.
    pub fn set(&self, key: &str, data: Value, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            ProxyEntry {
                data,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    // == Telemetry ==
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of physically resident entries (fresh or not yet observed
    /// as stale).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Key Composition ==
/// Composes the cache key from the routed path and its query string.
///
/// The query is normalized (parameters sorted by name, empty fragments
/// dropped) so parameter order and trailing separators never affect the
/// key.
pub fn cache_key(path: &str, query: Option<&str>) -> String {
    let normalized = match query {
        Some(query) => {
            let mut params: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
            params.sort_unstable();
            params.join("&")
        }
        None => String::new(),
    };
    format!("{}\n{}", path, normalized)
}

// == Category TTL ==
/// Picks the proxy TTL from the request path signature, by string
/// containment: post listings revalidate fastest, category trees slowest.
pub fn category_ttl(path: &str) -> Duration {
    if path.contains("posts") {
        POSTS_TTL
    } else if path.contains("categories") {
        CATEGORIES_TTL
    } else {
        DEFAULT_TTL
    }
}
