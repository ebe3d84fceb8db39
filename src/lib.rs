//! strqueue - a singly-linked queue of owned byte strings
//!
//! The [`queue`] module holds the data structure itself. [`config`] and
//! [`logging`] provide the file-based configuration and structured logging
//! used by programs that embed it.

pub mod config;
pub mod logging;
pub mod queue;

pub use queue::{Queue, QueueError, QueueHandle, QueueResult};
