//! Generation Token Module
//!
//! Epoch marker shared by every entry inserted during one cache generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// == Generation Token ==
/// A cancellable marker for one cache generation.
///
/// Clones share the same cancellation flag, so cancelling the manager's
/// token invalidates every entry that captured a clone of it.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    /// Monotonic generation number, never reused within a manager
    generation: u64,
    /// Shared cancellation flag
    cancelled: Arc<AtomicBool>,
}

impl GenerationToken {
    /// Creates a live token for the given generation.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Retires the token. Cancelling twice is harmless.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns the live token that replaces this one.
    pub fn successor(&self) -> Self {
        Self::new(self.generation + 1)
    }
}
