//! Global write limiter
//!
//! A process-wide counting gate bounding how many outbound flushes may be
//! in flight at once across all connections. Coalescing in the writers
//! keeps per-flush payloads large; this keeps the number of simultaneous
//! flushes small.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting admission gate for outbound flushes
///
/// Clones share the same capacity. `acquire` waits for a free slot with no
/// fairness guarantee beyond eventual admission; a slot is returned when
/// the `WriteSlot` is dropped.
#[derive(Debug, Clone)]
pub struct WriteLimiter {
    permits: Arc<Semaphore>,
}

/// One unit of flush capacity, held for the duration of a single flush
#[derive(Debug)]
pub struct WriteSlot {
    _permit: OwnedSemaphorePermit,
}

impl WriteLimiter {
    /// Create a limiter admitting at most `capacity` concurrent flushes
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
        }
    }

    /// Wait for a flush slot.
    ///
    /// Cancel-safe: dropping the future before it resolves consumes
    /// nothing.
    pub async fn acquire(&self) -> WriteSlot {
        // The semaphore is never closed, so acquisition cannot fail.
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .expect("write limiter semaphore is never closed");
        WriteSlot { _permit: permit }
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
