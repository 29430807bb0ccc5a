//! Memo Cache - An in-process memoization cache
//!
//! Keyed storage of arbitrary values with sliding expiration, an
//! enabled/disabled switch, O(1) bulk invalidation and get-or-compute
//! helpers for fallbacks of up to five arguments.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::CacheManager;
pub use config::{CacheSettings, Config};
pub use error::CacheError;
pub use tasks::spawn_cleanup_task;
