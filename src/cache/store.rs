//! Cache Store Module
//!
//! Disk-backed keyed store with per-entry expiry metadata. Each entry is a
//! JSON file under the cache directory, mirrored by an in-memory index for
//! fast reads. Storage faults are logged and swallowed: the cache is an
//! optimization, never a source of truth.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{policy, CacheEntry, CacheStats};
use crate::error::StoreError;

// == Persisted Form ==
/// On-disk representation: the entry plus its key, so the index can be
/// rebuilt from the directory alone.
#[derive(Deserialize)]
struct PersistedEntry {
    key: String,
    #[serde(flatten)]
    entry: CacheEntry,
}

#[derive(Serialize)]
struct PersistedEntryRef<'a> {
    key: &'a str,
    #[serde(flatten)]
    entry: &'a CacheEntry,
}

// == Cache Store ==
/// Persistent key/value cache with TTL expiry.
///
/// All operations are atomic at single-key granularity; concurrent writers
/// to the same key race and the last completed write wins. Disk I/O happens
/// outside the index lock.
#[derive(Debug)]
pub struct CacheStore {
    /// In-memory index of live entries
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Directory holding one JSON file per entry
    dir: PathBuf,
}

impl CacheStore {
    // == Open ==
    /// Opens (or creates) the store at the given directory and rebuilds
    /// the index from any entries persisted by a previous process.
    ///
    /// Unreadable or corrupt entry files are logged and skipped.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let mut entries = HashMap::new();
        let mut reader = tokio::fs::read_dir(&dir).await?;
        while let Some(file) = reader.next_entry().await? {
            let path = file.path();
            if path.extension().map(|ext| ext == "json") != Some(true) {
                continue;
            }
            match load_entry_file(&path).await {
                Ok(persisted) => {
                    entries.insert(persisted.key, persisted.entry);
                }
                Err(err) => {
                    warn!("Skipping unreadable cache file {}: {}", path.display(), err);
                }
            }
        }

        debug!("Cache store opened with {} entries", entries.len());
        Ok(Self {
            entries: RwLock::new(entries),
            dir,
        })
    }

    // == Get ==
    /// Retrieves and deserializes a value by key.
    ///
    /// Returns `None` on miss, on deserialize error, or once the entry has
    /// logically expired (expiry is checked on every read in addition to
    /// being swept). An expired entry observed here is evicted.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.is_expired() => {}
                Some(entry) => {
                    return match serde_json::from_value(entry.value.clone()) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            warn!("Cache entry '{}' failed to deserialize: {}", key, err);
                            None
                        }
                    };
                }
            }
        }

        self.evict_if_expired(key).await;
        None
    }

    // == Set ==
    /// Writes or overwrites an entry, stamping `stored_at = now` and
    /// deriving the permanent flag from the TTL.
    ///
    /// Persistence failures are logged and swallowed; the in-memory entry
    /// is kept either way.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                warn!("Cache set for '{}' skipped, unserializable value: {}", key, err);
                return;
            }
        };

        let entry = CacheEntry::new(value, ttl);
        if let Err(err) = self.persist(key, &entry).await {
            warn!("Failed to persist cache entry '{}': {}", key, err);
        }

        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Writes an article payload with a TTL derived from the content's own
    /// publication date rather than from request time.
    pub async fn set_article<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        content_date: DateTime<Utc>,
    ) {
        self.set(key, value, policy::article_ttl(content_date)).await;
    }

    // == Needs Refresh ==
    /// Whether the entry under `key` should be refreshed from source,
    /// given the content's publication date. A missing entry always needs
    /// a refresh; an entry whose content has crossed the permanent
    /// boundary never does.
    pub async fn needs_refresh(&self, key: &str, content_date: DateTime<Utc>) -> bool {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => policy::should_revalidate(
                entry.stored_at,
                content_date,
                Duration::from_millis(entry.ttl_ms),
            ),
            None => true,
        }
    }

    // == Delete ==
    /// Removes an entry by key. Idempotent.
    pub async fn delete(&self, key: &str) {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            self.remove_file(key).await;
        }
    }

    // == Clear ==
    /// Removes every key containing `pattern` as a substring, or every
    /// entry when no pattern is given.
    pub async fn clear(&self, pattern: Option<&str>) {
        let removed: Vec<String> = {
            let mut entries = self.entries.write().await;
            match pattern {
                Some(pattern) => {
                    let keys: Vec<String> = entries
                        .keys()
                        .filter(|key| key.contains(pattern))
                        .cloned()
                        .collect();
                    for key in &keys {
                        entries.remove(key);
                    }
                    keys
                }
                None => entries.drain().map(|(key, _)| key).collect(),
            }
        };

        for key in &removed {
            self.remove_file(key).await;
        }
        debug!("Cleared {} cache entries", removed.len());
    }

    // == Clean Expired ==
    /// Removes every non-permanent entry whose logical expiry has passed.
    ///
    /// Iterates a snapshot of candidate keys so concurrent `set`/`delete`
    /// calls during the sweep are safe; each candidate is re-checked under
    /// the write lock so a concurrently refreshed entry is never removed.
    ///
    /// Returns the number of entries removed.
    pub async fn clean_expired(&self) -> usize {
        let candidates: Vec<String> = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .filter(|(_, entry)| entry.is_expired())
                .map(|(key, _)| key.clone())
                .collect()
        };

        if candidates.is_empty() {
            return 0;
        }

        let mut removed = Vec::new();
        {
            let mut entries = self.entries.write().await;
            for key in candidates {
                if entries.get(&key).map(CacheEntry::is_expired).unwrap_or(false) {
                    entries.remove(&key);
                    removed.push(key);
                }
            }
        }

        for key in &removed {
            self.remove_file(key).await;
        }
        removed.len()
    }

    // == Stats ==
    /// Computes aggregate statistics from a live scan of current entries.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut stats = CacheStats::new();
        for entry in entries.values() {
            stats.observe(entry);
        }
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // == Internals ==
    async fn evict_if_expired(&self, key: &str) {
        let removed = {
            let mut entries = self.entries.write().await;
            match entries.get(key) {
                Some(entry) if entry.is_expired() => {
                    entries.remove(key);
                    true
                }
                _ => false,
            }
        };
        if removed {
            self.remove_file(key).await;
        }
    }

    async fn persist(&self, key: &str, entry: &CacheEntry) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&PersistedEntryRef { key, entry })?;
        let path = self.entry_path(key);
        // Write-then-rename so a concurrent reader or a crash never
        // observes a half-written entry.
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove_file(&self, key: &str) {
        let path = self.entry_path(key);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove cache file for '{}': {}", key, err);
            }
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Test hook: inserts a pre-built entry (e.g. with a backdated
    /// `stored_at`) directly into the index and onto disk.
    #[cfg(test)]
    pub(crate) async fn insert_raw(&self, key: &str, entry: CacheEntry) {
        if let Err(err) = self.persist(key, &entry).await {
            warn!("Failed to persist cache entry '{}': {}", key, err);
        }
        self.entries.write().await.insert(key.to_string(), entry);
    }
}

async fn load_entry_file(path: &std::path::Path) -> Result<PersistedEntry, StoreError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
