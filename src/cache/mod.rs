//! Cache Module
//!
//! Provides in-process memoization with sliding expiration and
//! generation-based bulk invalidation.

mod entry;
mod fallback;
mod manager;
mod stats;
mod store;
mod token;


// Re-export public types
pub use entry::{CacheEntry, CachePriority, CachedValue};
pub use fallback::Fallback;
pub use manager::CacheManager;
pub use stats::CacheStats;
pub use store::{InMemoryStore, MemoryStore};
pub use token::GenerationToken;
