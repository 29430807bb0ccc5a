//! Cache Manager Module
//!
//! Policy layer over a [`MemoryStore`]: default durations, the enabled
//! switch, generation-based bulk invalidation and memoized computations.

use std::any::Any;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::cache::stats::StatsRecorder;
use crate::cache::{
    CacheEntry, CachePriority, CacheStats, CachedValue, Fallback, GenerationToken,
    InMemoryStore, MemoryStore,
};
use crate::config::CacheSettings;
use crate::error::{CacheError, Result};

// == Cache Manager ==
/// In-process memoization cache.
///
/// Reads through [`has`](Self::has), [`try_get`](Self::try_get) and the
/// memoizing methods are gated by the enabled flag: a disabled cache behaves
/// as permanently empty. Writes are never gated.
///
/// Concurrent misses on the same key are not deduplicated; each caller runs
/// its fallback and the last write wins.
pub struct CacheManager<S = InMemoryStore> {
    store: S,
    settings: CacheSettings,
    default_duration: Duration,
    /// Token tagged onto new entries; swapped out by `clear_all`
    current: RwLock<GenerationToken>,
    stats: StatsRecorder,
}

impl CacheManager<InMemoryStore> {
    /// Creates a manager over a fresh [`InMemoryStore`].
    pub fn new(settings: CacheSettings) -> Self {
        Self::with_store(InMemoryStore::new(), settings)
    }
}

impl Default for CacheManager<InMemoryStore> {
    fn default() -> Self {
        Self::new(CacheSettings::default())
    }
}

impl<S: MemoryStore> CacheManager<S> {
    // == Constructor ==
    /// Creates a manager over an existing store.
    pub fn with_store(store: S, settings: CacheSettings) -> Self {
        Self {
            store,
            settings,
            default_duration: settings.default_duration(),
            current: RwLock::new(GenerationToken::new(0)),
            stats: StatsRecorder::default(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub fn caching_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Window applied when a caller leaves the duration unset.
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Current generation number; incremented by every [`clear_all`](Self::clear_all).
    pub fn generation(&self) -> u64 {
        self.current.read().generation()
    }

    // == Set ==
    /// Stores `value` under `key` with normal priority.
    ///
    /// `ttl` is the sliding window in seconds; `None` or `Some(0)` uses the
    /// default duration. Overwrites silently.
    pub fn set<T>(&self, key: impl Into<String>, value: T, ttl: Option<u64>)
    where
        T: Any + Send + Sync,
    {
        self.set_with_priority(key, value, ttl, CachePriority::Normal);
    }

    /// Stores `value` under `key` with an explicit retention hint.
    pub fn set_with_priority<T>(
        &self,
        key: impl Into<String>,
        value: T,
        ttl: Option<u64>,
        priority: CachePriority,
    ) where
        T: Any + Send + Sync,
    {
        let key = key.into();
        let sliding = self.effective_duration(ttl);
        let token = self.current.read().clone();

        debug!(
            "Caching '{}' for {:?} (sliding) in generation {}",
            key,
            sliding,
            token.generation()
        );
        self.store
            .upsert(key, CacheEntry::new(value, sliding, token, priority));
    }

    // == Has ==
    /// Returns true if caching is enabled and a live value exists for `key`.
    ///
    /// A successful check restarts the entry's sliding window.
    pub fn has(&self, key: &str) -> bool {
        self.settings.enabled && self.store.lookup(key).is_some()
    }

    // == Get ==
    /// Raw store lookup, ignoring the enabled flag.
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        self.store.lookup(key)
    }

    // == Try Get ==
    /// Gated lookup: the value only if caching is enabled and `key` is live.
    pub fn try_get(&self, key: &str) -> Option<CachedValue> {
        let value = if self.has(key) { self.get(key) } else { None };

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Typed gated lookup.
    ///
    /// Returns `Ok(None)` when absent, expired or disabled. A value of another
    /// type under `key` is a [`CacheError::TypeMismatch`].
    pub fn try_get_as<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: Any + Clone,
    {
        match self.try_get(key) {
            Some(value) => value
                .downcast_ref::<T>()
                .cloned()
                .map(Some)
                .ok_or_else(|| CacheError::TypeMismatch {
                    key: key.to_string(),
                    expected: std::any::type_name::<T>(),
                }),
            None => Ok(None),
        }
    }

    /// Typed gated lookup yielding `T::default()` when nothing is cached.
    pub fn try_get_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: Any + Clone + Default,
    {
        Ok(self.try_get_as(key)?.unwrap_or_default())
    }

    // == Memoization ==
    /// Returns the cached value under `key`, or runs `compute` and caches its
    /// result.
    ///
    /// # Errors
    /// [`CacheError::TypeMismatch`] if `key` holds a value of another type.
    pub fn try_get_or_compute<T, F>(&self, key: &str, compute: F, ttl: Option<u64>) -> Result<T>
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce() -> T,
    {
        self.try_get_or_compute_with(key, compute, (), ttl)
    }

    /// Like [`try_get_or_compute`](Self::try_get_or_compute) for a fallback
    /// taking up to five arguments, passed as a tuple.
    ///
    /// ```
    /// # use memo_cache::{CacheManager, CacheSettings};
    /// let cache = CacheManager::new(CacheSettings::default());
    /// let area = cache
    ///     .try_get_or_compute_with("area:3x4", |w: u32, h: u32| w * h, (3, 4), None)
    ///     .unwrap();
    /// assert_eq!(area, 12);
    /// ```
    pub fn try_get_or_compute_with<T, A, F>(
        &self,
        key: &str,
        compute: F,
        args: A,
        ttl: Option<u64>,
    ) -> Result<T>
    where
        T: Any + Clone + Send + Sync,
        F: Fallback<A, Output = T>,
    {
        if let Some(hit) = self.cached_or_miss(key)? {
            return Ok(hit);
        }

        let value = compute.call(args);
        self.set(key, value.clone(), ttl);
        Ok(value)
    }

    /// Memoizes a computation that may produce nothing.
    ///
    /// A `None` result is returned to the caller but not cached, so the next
    /// call computes again.
    pub fn try_get_or_compute_optional<T, F>(
        &self,
        key: &str,
        compute: F,
        ttl: Option<u64>,
    ) -> Result<Option<T>>
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce() -> Option<T>,
    {
        if let Some(hit) = self.cached_or_miss(key)? {
            return Ok(Some(hit));
        }

        let computed = compute();
        if let Some(value) = &computed {
            self.set(key, value.clone(), ttl);
        }
        Ok(computed)
    }

    /// Memoizes a fallible computation.
    ///
    /// An error from `compute` is returned unchanged and nothing is cached.
    pub fn try_get_or_try_compute<T, E, F>(
        &self,
        key: &str,
        compute: F,
        ttl: Option<u64>,
    ) -> std::result::Result<T, E>
    where
        T: Any + Clone + Send + Sync,
        E: From<CacheError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.try_get_or_try_compute_with(key, compute, (), ttl)
    }

    /// Fallible memoization with a fallback taking up to five arguments.
    pub fn try_get_or_try_compute_with<T, E, A, F>(
        &self,
        key: &str,
        compute: F,
        args: A,
        ttl: Option<u64>,
    ) -> std::result::Result<T, E>
    where
        T: Any + Clone + Send + Sync,
        E: From<CacheError>,
        F: Fallback<A, Output = std::result::Result<T, E>>,
    {
        if let Some(hit) = self.cached_or_miss(key)? {
            return Ok(hit);
        }

        let value = compute.call(args)?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }

    /// Typed gated read for the memoizing methods; a miss is counted as a
    /// compute since the caller runs its fallback next.
    fn cached_or_miss<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: Any + Clone,
    {
        let hit = self.try_get_as::<T>(key)?;
        if hit.is_none() {
            debug!("Cache miss for '{}', computing", key);
            self.stats.record_compute();
        }
        Ok(hit)
    }

    // == Remove ==
    /// Removes `key` if it is currently visible; otherwise does nothing.
    ///
    /// While caching is disabled nothing is visible, so nothing is removed.
    pub fn remove(&self, key: &str) {
        if self.has(key) && self.store.remove(key) {
            debug!("Removed '{}'", key);
        }
    }

    /// Applies [`remove`](Self::remove) to each key in order.
    pub fn remove_many<I, K>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.remove(key.as_ref());
        }
    }

    // == Clear All ==
    /// Logically invalidates every entry by retiring the current generation.
    ///
    /// Entries stay in the store until looked up or purged.
    pub fn clear_all(&self) {
        let retired = {
            let mut current = self.current.write();
            let next = current.successor();
            std::mem::replace(&mut *current, next)
        };
        retired.cancel();
        self.stats.record_clear();

        info!(
            "Cache cleared: generation {} retired, {} entries pending purge",
            retired.generation(),
            self.store.len()
        );
    }

    // == Purge ==
    /// Physically drops expired and invalidated entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let removed = self.store.purge_expired();
        self.stats.record_purged(removed);
        removed
    }

    /// Number of physically stored entries, dead ones included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of cache activity.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.store.len(), self.generation())
    }

    fn effective_duration(&self, ttl: Option<u64>) -> Duration {
        match ttl {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => self.default_duration,
        }
    }
}
