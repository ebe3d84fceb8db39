//! Operations on a possibly absent queue
//!
//! Drivers that hold a queue as an `Option` (for example after a fallible
//! construction mapped through `.ok()`) get every queue operation with
//! benign absent-queue semantics: mutations report
//! [`QueueError::InvalidQueue`], `size` reports 0, and `reverse`/`sort` do
//! nothing.

use std::borrow::{Borrow, BorrowMut};

use crate::queue::{Queue, QueueError, QueueResult};

/// Queue operations for a handle that may not hold a queue
pub trait QueueHandle {
    fn insert_head(&mut self, value: impl AsRef<[u8]>) -> QueueResult<()>;

    fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> QueueResult<()>;

    fn remove_head(&mut self, buffer: Option<&mut [u8]>) -> QueueResult<usize>;

    fn size(&self) -> usize;

    fn reverse(&mut self);

    fn sort(&mut self);
}

impl<Q: BorrowMut<Queue>> QueueHandle for Option<Q> {
    fn insert_head(&mut self, value: impl AsRef<[u8]>) -> QueueResult<()> {
        present_mut(self)?.insert_head(value)
    }

    fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> QueueResult<()> {
        present_mut(self)?.insert_tail(value)
    }

    fn remove_head(&mut self, buffer: Option<&mut [u8]>) -> QueueResult<usize> {
        present_mut(self)?.remove_head(buffer)
    }

    fn size(&self) -> usize {
        self.as_ref().map(<Q as Borrow<Queue>>::borrow).map_or(0, Queue::size)
    }

    fn reverse(&mut self) {
        if let Ok(queue) = present_mut(self) {
            queue.reverse();
        }
    }

    fn sort(&mut self) {
        if let Ok(queue) = present_mut(self) {
            queue.sort();
        }
    }
}

fn present_mut<Q: BorrowMut<Queue>>(handle: &mut Option<Q>) -> QueueResult<&mut Queue> {
    handle
        .as_mut()
        .map(<Q as BorrowMut<Queue>>::borrow_mut)
        .ok_or(QueueError::InvalidQueue)
}

/// Free a possibly absent queue; absent is a no-op
pub fn free(queue: Option<Queue>) {
    if let Some(queue) = queue {
        queue.free();
    }
}
