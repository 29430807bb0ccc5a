//! Cache Store Module
//!
//! Storage abstraction consumed by the cache manager, plus the concurrent
//! in-memory implementation used by default.

use dashmap::DashMap;
use tracing::debug;

use crate::cache::{CacheEntry, CachedValue};

// == Memory Store ==
/// Concurrent key-value storage honouring sliding expiration and generation
/// tokens.
///
/// Implementations must treat an expired or invalidated entry exactly like a
/// missing one.
pub trait MemoryStore: Send + Sync {
    /// Inserts or overwrites the entry under `key`.
    fn upsert(&self, key: String, entry: CacheEntry);

    /// Returns the value under `key` if live, restarting its sliding window.
    fn lookup(&self, key: &str) -> Option<CachedValue>;

    /// Deletes the entry under `key`. Returns whether something was removed.
    fn remove(&self, key: &str) -> bool;

    /// Physically drops every expired or invalidated entry.
    ///
    /// Returns the number of entries removed.
    fn purge_expired(&self) -> usize;

    /// Number of physically stored entries, dead ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == In-Memory Store ==
/// `DashMap`-backed store. Dead entries are dropped lazily on lookup and in
/// bulk by [`MemoryStore::purge_expired`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, CacheEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryStore for InMemoryStore {
    fn upsert(&self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    fn lookup(&self, key: &str) -> Option<CachedValue> {
        match self.entries.get_mut(key) {
            Some(mut entry) if entry.is_live() => {
                entry.touch();
                return Some(entry.value.clone());
            }
            Some(_) => {}
            None => return None,
        }

        // Shard lock released above; re-check so a concurrent upsert survives
        if self.entries.remove_if(key, |_, entry| !entry.is_live()).is_some() {
            debug!("Evicted dead entry '{}' on lookup", key);
        }
        None
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn purge_expired(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let live = entry.is_live();
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CachePriority, GenerationToken};
    use std::thread::sleep;
    use std::time::Duration;

    fn entry<T>(value: T, sliding: Duration, token: &GenerationToken) -> CacheEntry
    where
        T: std::any::Any + Send + Sync,
    {
        CacheEntry::new(value, sliding, token.clone(), CachePriority::Normal)
    }

    fn lookup_string(store: &InMemoryStore, key: &str) -> Option<String> {
        store
            .lookup(key)
            .and_then(|v| v.downcast_ref::<String>().cloned())
    }

    #[test]
    fn test_store_new() {
        let store = InMemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_upsert_and_lookup() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("key1".to_string(), entry("value1".to_string(), Duration::from_secs(60), &token));

        assert_eq!(lookup_string(&store, "key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lookup_nonexistent() {
        let store = InMemoryStore::new();
        assert!(store.lookup("nonexistent").is_none());
    }

    #[test]
    fn test_store_keys_are_case_sensitive() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("Key".to_string(), entry(1u32, Duration::from_secs(60), &token));

        assert!(store.lookup("Key").is_some());
        assert!(store.lookup("key").is_none());
    }

    #[test]
    fn test_store_overwrite() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("key1".to_string(), entry("value1".to_string(), Duration::from_secs(60), &token));
        store.upsert("key1".to_string(), entry("value2".to_string(), Duration::from_secs(60), &token));

        assert_eq!(lookup_string(&store, "key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_remove() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("key1".to_string(), entry(1u32, Duration::from_secs(60), &token));

        assert!(store.remove("key1"));
        assert!(!store.remove("key1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_expired_lookup_evicts() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("key1".to_string(), entry(1u32, Duration::from_millis(100), &token));
        assert!(store.lookup("key1").is_some());

        sleep(Duration::from_millis(150));

        assert!(store.lookup("key1").is_none());
        assert!(store.is_empty(), "Dead entry should be dropped on lookup");
    }

    #[test]
    fn test_store_lookup_slides_expiration() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("key1".to_string(), entry(1u32, Duration::from_millis(250), &token));

        for _ in 0..3 {
            sleep(Duration::from_millis(120));
            assert!(store.lookup("key1").is_some());
        }
    }

    #[test]
    fn test_store_cancelled_token_hides_entries() {
        let store = InMemoryStore::new();
        let token = GenerationToken::new(0);

        store.upsert("key1".to_string(), entry(1u32, Duration::from_secs(60), &token));
        store.upsert("key2".to_string(), entry(2u32, Duration::from_secs(60), &token));

        token.cancel();

        // Still physically present until looked up or purged
        assert_eq!(store.len(), 2);
        assert!(store.lookup("key1").is_none());
        assert!(store.lookup("key2").is_none());
    }

    #[test]
    fn test_store_purge_expired() {
        let store = InMemoryStore::new();
        let old = GenerationToken::new(0);
        let current = old.successor();

        store.upsert("short".to_string(), entry(1u32, Duration::from_millis(50), &current));
        store.upsert("retired".to_string(), entry(2u32, Duration::from_secs(60), &old));
        store.upsert("long".to_string(), entry(3u32, Duration::from_secs(60), &current));
        old.cancel();

        sleep(Duration::from_millis(100));

        let removed = store.purge_expired();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.lookup("long").is_some());
    }
}
