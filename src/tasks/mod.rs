//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Sweep: Physically removes expired and invalidated cache entries

mod cleanup;

pub use cleanup::spawn_cleanup_task;
