//! Singly-Linked String Queue
//!
//! `Queue` exclusively owns a chain of elements, each holding an owned copy
//! of a byte-string value. Insertion at either end and removal from the head
//! run in O(1): the element count and the tail are maintained by every
//! mutating operation rather than recomputed by walking the chain.
//!
//! Every allocation is fallible. Storage for the node and for the copied
//! value is obtained separately, and a failure at either step leaves the
//! queue exactly as it was before the call.

use std::fmt;
use std::mem;
use std::sync::Arc;

use log::{debug, trace};

use crate::queue::element::{Element, ElementArena, ElementId};
use crate::queue::{MemoryTracker, QueueConfig, QueueError, QueueResult};

/// Queue of owned byte strings backed by a singly-linked chain
pub struct Queue {
    pub(crate) elements: ElementArena,
    pub(crate) head: Option<ElementId>,
    pub(crate) tail: Option<ElementId>,
    pub(crate) size: usize,
    tracker: Option<Arc<MemoryTracker>>,
}

impl Queue {
    /// Bytes accounted for the container itself when tracking is enabled
    pub const CONTAINER_SIZE: usize = mem::size_of::<Queue>();

    /// Create an empty, untracked queue
    pub fn new() -> Self {
        Self::from_parts(ElementArena::new(), None)
    }

    /// Create an empty queue whose allocations are accounted by `tracker`.
    ///
    /// Fails with [`QueueError::AllocationFailure`] if the tracker refuses
    /// the container block.
    pub fn with_tracker(tracker: Arc<MemoryTracker>) -> QueueResult<Self> {
        if !tracker.allocate(Self::CONTAINER_SIZE) {
            return Err(QueueError::allocation_failure(Self::CONTAINER_SIZE));
        }
        Ok(Self::from_parts(ElementArena::new(), Some(tracker)))
    }

    /// Create an empty queue from configuration.
    ///
    /// Reserves `initial_capacity` element slots up front and attaches the
    /// tracker the configuration asks for. Callers that want an absent-queue
    /// indicator rather than an error can use `.ok()`.
    pub fn with_config(config: &QueueConfig) -> QueueResult<Self> {
        let elements = ElementArena::try_with_capacity(config.initial_capacity)?;
        let tracker = config.build_tracker();
        if let Some(tracker) = &tracker {
            if !tracker.allocate(Self::CONTAINER_SIZE) {
                return Err(QueueError::allocation_failure(Self::CONTAINER_SIZE));
            }
        }
        debug!(
            "Created queue: capacity={}, memory_limit={:?}, tracked={}",
            elements.capacity(),
            config.memory_limit,
            tracker.is_some()
        );
        Ok(Self::from_parts(elements, tracker))
    }

    /// Build a queue holding `values` in order, head first
    pub fn from_values<I, V>(values: I) -> QueueResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let mut queue = Self::new();
        for value in values {
            queue.insert_tail(value)?;
        }
        Ok(queue)
    }

    fn from_parts(elements: ElementArena, tracker: Option<Arc<MemoryTracker>>) -> Self {
        Self {
            elements,
            head: None,
            tail: None,
            size: 0,
            tracker,
        }
    }

    /// Release every element and value, then the queue itself
    pub fn free(self) {
        trace!("Freeing queue with {} elements", self.size);
        drop(self);
    }

    /// Tracker accounting for this queue's allocations, if any
    pub fn tracker(&self) -> Option<&Arc<MemoryTracker>> {
        self.tracker.as_ref()
    }

    /// Copy `value` into a new element linked before the current head
    pub fn insert_head(&mut self, value: impl AsRef<[u8]>) -> QueueResult<()> {
        let id = self.allocate_element(value.as_ref(), self.head)?;
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.head = Some(id);
        self.size += 1;
        Ok(())
    }

    /// Copy `value` into a new element linked after the current tail
    pub fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> QueueResult<()> {
        let id = self.allocate_element(value.as_ref(), None)?;
        match self.tail {
            Some(tail) => self.elements.set_next(tail, Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.size += 1;
        Ok(())
    }

    /// Remove the head element, optionally copying its value out.
    ///
    /// With a buffer of capacity C, at most C-1 bytes of the value are copied
    /// followed by a NUL terminator; the rest of the buffer is zero-filled.
    /// An empty buffer receives nothing. Returns the number of value bytes
    /// copied.
    pub fn remove_head(&mut self, buffer: Option<&mut [u8]>) -> QueueResult<usize> {
        let element = self.unlink_head()?;
        let copied = match buffer {
            Some(buffer) => copy_truncated(&element.value, buffer),
            None => 0,
        };
        self.release(element);
        Ok(copied)
    }

    /// Remove the head element and hand its value to the caller
    pub fn pop_head(&mut self) -> Option<Vec<u8>> {
        let element = self.unlink_head().ok()?;
        self.track_release(element.value.len());
        self.track_release(Element::NODE_SIZE);
        Some(element.value.into_vec())
    }

    /// Number of elements in the queue
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Value of the first element
    pub fn peek_head(&self) -> Option<&[u8]> {
        self.head.map(|id| self.elements.value(id))
    }

    /// Value of the last element
    pub fn peek_tail(&self) -> Option<&[u8]> {
        self.tail.map(|id| self.elements.value(id))
    }

    /// Iterate values from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            elements: &self.elements,
            current: self.head,
            remaining: self.size,
        }
    }

    /// Release every element, leaving an empty queue
    pub fn clear(&mut self) {
        while let Ok(element) = self.unlink_head() {
            self.release(element);
        }
    }

    fn allocate_element(&mut self, value: &[u8], next: Option<ElementId>) -> QueueResult<ElementId> {
        self.track_allocation(Element::NODE_SIZE)?;
        if let Err(error) = self.elements.reserve_slot() {
            self.track_release(Element::NODE_SIZE);
            return Err(error);
        }

        // Node is held from here on and must be given back if the value fails
        if let Err(error) = self.track_allocation(value.len()) {
            self.track_release(Element::NODE_SIZE);
            return Err(error);
        }
        let stored = match ElementArena::copy_value(value) {
            Ok(stored) => stored,
            Err(error) => {
                self.track_release(value.len());
                self.track_release(Element::NODE_SIZE);
                return Err(error);
            }
        };

        Ok(self.elements.insert(Element { value: stored, next }))
    }

    fn unlink_head(&mut self) -> QueueResult<Element> {
        let head = self.head.ok_or(QueueError::EmptyQueue)?;
        let element = self.elements.remove(head);
        self.head = element.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.size -= 1;
        if self.size == 0 {
            self.elements.reset();
        }
        Ok(element)
    }

    fn release(&self, element: Element) {
        self.track_release(element.value.len());
        self.track_release(Element::NODE_SIZE);
    }

    fn track_allocation(&self, bytes: usize) -> QueueResult<()> {
        match &self.tracker {
            Some(tracker) if !tracker.allocate(bytes) => Err(QueueError::allocation_failure(bytes)),
            _ => Ok(()),
        }
    }

    fn track_release(&self, bytes: usize) {
        if let Some(tracker) = &self.tracker {
            tracker.deallocate(bytes);
        }
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
        self.track_release(Self::CONTAINER_SIZE);
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over queue values
pub struct Iter<'a> {
    elements: &'a ElementArena,
    current: Option<ElementId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let element = self.elements.get(id);
        self.current = element.next;
        self.remaining -= 1;
        Some(&element.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Copy up to `buffer.len() - 1` bytes of `value` and NUL-terminate
fn copy_truncated(value: &[u8], buffer: &mut [u8]) -> usize {
    if buffer.is_empty() {
        return 0;
    }
    let copied = value.len().min(buffer.len() - 1);
    buffer[..copied].copy_from_slice(&value[..copied]);
    buffer[copied..].fill(0);
    copied
}
