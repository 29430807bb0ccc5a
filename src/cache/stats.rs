//! Cache Statistics Module
//!
//! Tracks cache activity: gated reads, fallback computations, bulk clears
//! and physical sweeps.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache activity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Gated reads that found a live value
    pub hits: u64,
    /// Gated reads that found nothing (absent, expired, invalidated, disabled)
    pub misses: u64,
    /// Fallback computations run on a miss
    pub computes: u64,
    /// Bulk clears performed
    pub clears: u64,
    /// Dead entries physically removed by sweeps
    pub purged: u64,
    /// Physically stored entries at snapshot time
    pub total_entries: usize,
    /// Current generation number
    pub generation: u64,
    /// Time of the last bulk clear
    pub last_cleared_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters updated by the manager on every operation.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    computes: AtomicU64,
    clears: AtomicU64,
    purged: AtomicU64,
    last_cleared_at: Mutex<Option<DateTime<Utc>>>,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_compute(&self) {
        self.computes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
        *self.last_cleared_at.lock() = Some(Utc::now());
    }

    pub(crate) fn record_purged(&self, count: usize) {
        self.purged.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Builds a snapshot; entry count and generation come from the caller.
    pub(crate) fn snapshot(&self, total_entries: usize, generation: u64) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computes: self.computes.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            purged: self.purged.load(Ordering::Relaxed),
            total_entries,
            generation,
            last_cleared_at: *self.last_cleared_at.lock(),
        }
    }
}
