//! Queue Error Types
//!
//! Defines error types specific to the queue operations.

use thiserror::Error;

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur during queue operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Operation was invoked without a queue
    #[error("No queue - operation requires a constructed queue")]
    InvalidQueue,

    /// Removal was requested from a queue with no elements
    #[error("Queue is empty - nothing to remove")]
    EmptyQueue,

    /// Storage for the container, an element or its value could not be obtained
    #[error("Allocation of {requested} bytes failed")]
    AllocationFailure { requested: usize },
}

impl QueueError {
    /// Create an allocation failure error
    pub fn allocation_failure(requested: usize) -> Self {
        Self::AllocationFailure { requested }
    }

    /// True for errors caused by resource exhaustion rather than misuse
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }
}
