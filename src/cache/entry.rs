//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with sliding expiration.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::cache::GenerationToken;

/// Type-erased value held by the cache.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

// == Cache Priority ==
/// Retention hint recorded with each entry.
///
/// The cache has no size limit, so the hint does not change eviction; it is
/// kept so stores with memory-pressure handling can honour it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePriority {
    Low,
    #[default]
    Normal,
    High,
    NeverRemove,
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: CachedValue,
    /// Name of the stored type, for diagnostics
    pub type_name: &'static str,
    /// Sliding expiration window
    pub sliding: Duration,
    /// Last insertion or successful read
    pub last_access: Instant,
    /// Insertion time
    pub created_at: DateTime<Utc>,
    /// Generation the entry was inserted under
    pub token: GenerationToken,
    /// Retention hint
    pub priority: CachePriority,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry tagged with `token`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `sliding` - Expiration window, reset on every successful read
    /// * `token` - Generation token current at insertion
    /// * `priority` - Retention hint
    pub fn new<T>(
        value: T,
        sliding: Duration,
        token: GenerationToken,
        priority: CachePriority,
    ) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
            sliding,
            last_access: Instant::now(),
            created_at: Utc::now(),
            token,
            priority,
        }
    }

    // == Is Expired ==
    /// Checks if the sliding window has elapsed since the last access.
    ///
    /// An entry is expired once the idle time reaches the window.
    pub fn is_expired(&self) -> bool {
        self.last_access.elapsed() >= self.sliding
    }

    /// Checks if the entry's generation has been retired.
    pub fn is_invalidated(&self) -> bool {
        self.token.is_cancelled()
    }

    /// An entry is live while neither expired nor invalidated.
    pub fn is_live(&self) -> bool {
        !self.is_invalidated() && !self.is_expired()
    }

    // == Touch ==
    /// Restarts the sliding window from now.
    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    // == Time To Live ==
    /// Returns the idle time left before the entry expires.
    pub fn ttl_remaining(&self) -> Duration {
        self.sliding.saturating_sub(self.last_access.elapsed())
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("type_name", &self.type_name)
            .field("sliding", &self.sliding)
            .field("created_at", &self.created_at)
            .field("generation", &self.token.generation())
            .field("priority", &self.priority)
            .finish()
    }
}
