//! Property-Based Tests for the Cache Store
//!
//! Uses proptest to verify the store's contract against a simple
//! in-memory model across arbitrary operation sequences.

use std::collections::HashMap;

use proptest::prelude::*;
use serde_json::json;

use crate::cache::policy::{PERMANENT_THRESHOLD, TTL_FRESH};
use crate::cache::CacheStore;

// == Strategies ==
/// Generates cache keys from a small namespace-flavored alphabet so
/// operation sequences actually collide on keys.
fn key_strategy() -> impl Strategy<Value = String> {
    "(article|category|media):[a-z0-9]{1,8}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}".prop_map(|s| s)
}

/// A single operation against the store, mirrored in the model.
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, long_lived: bool },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy(), any::<bool>()).prop_map(
            |(key, value, long_lived)| CacheOp::Set {
                key,
                value,
                long_lived
            }
        ),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // For any operation sequence, get SHALL return exactly what the model
    // says: the most recently set, not-deleted value for the key.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let store = CacheStore::open(dir.path()).await.unwrap();
            // Model: key -> (value, permanent)
            let mut model: HashMap<String, (String, bool)> = HashMap::new();

            for op in ops {
                match op {
                    CacheOp::Set { key, value, long_lived } => {
                        let ttl = if long_lived { PERMANENT_THRESHOLD } else { TTL_FRESH };
                        store.set(&key, &json!(value), ttl).await;
                        model.insert(key, (value, long_lived));
                    }
                    CacheOp::Get { key } => {
                        let got: Option<String> = store.get(&key).await;
                        let expected = model.get(&key).map(|(value, _)| value.clone());
                        prop_assert_eq!(got, expected, "get mismatch for key");
                    }
                    CacheOp::Delete { key } => {
                        store.delete(&key).await;
                        model.remove(&key);
                    }
                }
            }

            // Stats are scan-derived and must agree with the model.
            let stats = store.stats().await;
            let expected_permanent =
                model.values().filter(|(_, permanent)| *permanent).count();
            prop_assert_eq!(stats.entries, model.len());
            prop_assert_eq!(stats.permanent, expected_permanent);
            prop_assert_eq!(stats.temporary, model.len() - expected_permanent);
            prop_assert_eq!(stats.entries, store.len().await);
            Ok(())
        })?;
    }

    // For any key-value pair, storing and retrieving before expiration
    // SHALL return the exact stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let store = CacheStore::open(dir.path()).await.unwrap();

            store.set(&key, &json!(&value), TTL_FRESH).await;

            let retrieved: Option<String> = store.get(&key).await;
            prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
            Ok(())
        })?;
    }

    // For any stored key, a reopened store SHALL serve the same value
    // (best-effort persistence actually persists in the happy path).
    #[test]
    fn prop_reopen_preserves_entries(key in key_strategy(), value in value_strategy()) {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            {
                let store = CacheStore::open(dir.path()).await.unwrap();
                store.set(&key, &json!(&value), TTL_FRESH).await;
            }

            let reopened = CacheStore::open(dir.path()).await.unwrap();
            let retrieved: Option<String> = reopened.get(&key).await;
            prop_assert_eq!(retrieved, Some(value), "Value lost across reopen");
            Ok(())
        })?;
    }

    // For any key, delete SHALL make a subsequent get miss, and a second
    // delete SHALL be a no-op.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let store = CacheStore::open(dir.path()).await.unwrap();

            store.set(&key, &json!(value), TTL_FRESH).await;
            store.delete(&key).await;

            let retrieved: Option<String> = store.get(&key).await;
            prop_assert!(retrieved.is_none(), "Key should not exist after delete");

            store.delete(&key).await;
            prop_assert_eq!(store.len().await, 0);
            Ok(())
        })?;
    }
}
