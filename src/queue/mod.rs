//! Singly-Linked Queue of Byte Strings
//!
//! A queue that owns a chain of elements, each holding its own copy of a
//! byte-string value. It supports O(1) insertion at either end, O(1)
//! removal from the head, an O(1) size query, in-place reversal and an
//! in-place merge sort.
//!
//! # Architecture
//!
//! - **Queue**: the container; keeps head, tail and size consistent
//! - **Element arena**: slot storage for the chain, links are slot indices
//! - **MemoryTracker**: optional accounting of every allocation, with a
//!   byte limit and failure injection for exercising rollback paths
//! - **QueueHandle**: the same operations on an `Option`, for drivers that
//!   must cope with an absent queue
//!
//! The queue has no internal synchronisation. Callers sharing one between
//! threads wrap the whole queue behind a lock.
//!
//! # Usage
//!
//! ```rust
//! use strqueue::queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.insert_tail("banana").unwrap();
//! queue.insert_tail("apple").unwrap();
//! queue.insert_head("cherry").unwrap();
//! assert_eq!(queue.size(), 3);
//!
//! queue.sort();
//! assert_eq!(queue.peek_head(), Some(&b"apple"[..]));
//!
//! queue.reverse();
//! let mut buffer = [0u8; 16];
//! queue.remove_head(Some(&mut buffer)).unwrap();
//! assert_eq!(&buffer[..7], b"cherry\0");
//! assert_eq!(queue.size(), 2);
//!
//! queue.free();
//! ```

pub mod config;
mod element;
pub mod error;
pub mod handle;
pub mod memory_tracker;
mod reverse;
mod sort;
pub mod string_queue;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::{QueueConfig, QueuePreset};
pub use error::{QueueError, QueueResult};
pub use handle::{free, QueueHandle};
pub use memory_tracker::MemoryTracker;
pub use string_queue::{Iter, Queue};
