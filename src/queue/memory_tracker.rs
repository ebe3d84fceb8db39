//! Memory Tracking and Monitoring
//!
//! Accounts for every block a queue allocates (the container, each element
//! node and each element value) so that callers can check for leaks after a
//! queue has been freed, cap the bytes a queue may hold, and inject
//! allocation failures to exercise rollback paths.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Memory usage tracker for queue allocations
#[derive(Debug, Default)]
pub struct MemoryTracker {
    allocated_bytes: AtomicUsize,
    allocated_blocks: AtomicUsize,
    max_bytes: Option<usize>,
    // n + 1 while armed, 0 when disarmed
    fail_countdown: AtomicUsize,
}

impl MemoryTracker {
    /// Create a new memory tracker with specified limit
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes: Some(max_bytes),
            ..Self::default()
        }
    }

    /// Create a tracker that only counts, never refusing on size
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Make the allocation after the next `successes` ones fail, once.
    ///
    /// `fail_after(0)` fails the very next allocation.
    pub fn fail_after(&self, successes: usize) {
        self.fail_countdown.store(successes.saturating_add(1), Ordering::Relaxed);
    }

    /// Track allocation of a block of the specified size.
    ///
    /// Returns `false` without recording anything if the allocation would
    /// exceed the limit or an injected failure is due.
    pub fn allocate(&self, bytes: usize) -> bool {
        match self.fail_countdown.load(Ordering::Relaxed) {
            0 => {}
            1 => {
                self.fail_countdown.store(0, Ordering::Relaxed);
                return false;
            }
            remaining => self.fail_countdown.store(remaining - 1, Ordering::Relaxed),
        }

        let current = self.allocated_bytes.load(Ordering::Relaxed);
        if let Some(max_bytes) = self.max_bytes {
            if current.saturating_add(bytes) > max_bytes {
                return false; // Would exceed limit
            }
        }
        self.allocated_bytes.fetch_add(bytes, Ordering::Relaxed);
        self.allocated_blocks.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Track release of a block of the specified size
    pub fn deallocate(&self, bytes: usize) {
        self.allocated_bytes.fetch_sub(bytes, Ordering::Relaxed);
        self.allocated_blocks.fetch_sub(1, Ordering::Relaxed);
    }

    /// Get current allocated bytes
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes.load(Ordering::Relaxed)
    }

    /// Get number of blocks currently allocated and not yet released
    pub fn allocated_blocks(&self) -> usize {
        self.allocated_blocks.load(Ordering::Relaxed)
    }

    /// Configured byte limit, if any
    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// Get memory usage as percentage of the limit (0.0 when unlimited)
    pub fn usage_percent(&self) -> f64 {
        match self.max_bytes {
            Some(max_bytes) if max_bytes > 0 => {
                (self.allocated_bytes() as f64 / max_bytes as f64) * 100.0
            }
            _ => 0.0,
        }
    }

    /// Check if memory usage exceeds threshold
    pub fn exceeds_threshold(&self, threshold_percent: f64) -> bool {
        self.usage_percent() > threshold_percent
    }
}
