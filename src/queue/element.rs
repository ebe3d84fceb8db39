//! Element Storage
//!
//! Elements of a queue live in an arena owned by that queue and refer to
//! their successor by [`ElementId`]. Vacant slots are threaded into an
//! intrusive free list, so releasing an element never allocates and a
//! released slot is reused by the next insertion. Once the last element is
//! gone the arena shrinks back to the capacity it was created with.

use std::mem;

use crate::queue::{QueueError, QueueResult};

/// Index of an element slot within its queue's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ElementId(usize);

/// One link in the chain: an owned value and the index of its successor
#[derive(Debug)]
pub(crate) struct Element {
    pub(crate) value: Box<[u8]>,
    pub(crate) next: Option<ElementId>,
}

impl Element {
    /// Bytes accounted for the node itself, excluding its value
    pub(crate) const NODE_SIZE: usize = mem::size_of::<Element>();
}

#[derive(Debug)]
enum Slot {
    Occupied(Element),
    Vacant { next_free: Option<ElementId> },
}

/// Slot storage for elements
#[derive(Debug, Default)]
pub(crate) struct ElementArena {
    slots: Vec<Slot>,
    free_head: Option<ElementId>,
    base_capacity: usize,
}

impl ElementArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` elements up front
    pub(crate) fn try_with_capacity(capacity: usize) -> QueueResult<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::allocation_failure(capacity.saturating_mul(mem::size_of::<Slot>())))?;
        Ok(Self {
            base_capacity: slots.capacity(),
            slots,
            free_head: None,
        })
    }

    /// Number of slots the arena can hold without growing
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drop every slot and give storage beyond the base capacity back.
    ///
    /// Only valid once all elements have been removed.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.slots.shrink_to(self.base_capacity);
        self.free_head = None;
    }

    /// Make sure the next [`insert`](Self::insert) will not need to grow storage
    pub(crate) fn reserve_slot(&mut self) -> QueueResult<()> {
        if self.free_head.is_some() || self.slots.len() < self.slots.capacity() {
            return Ok(());
        }
        self.slots
            .try_reserve(1)
            .map_err(|_| QueueError::allocation_failure(mem::size_of::<Slot>()))
    }

    /// Copy a caller's value into newly owned storage
    pub(crate) fn copy_value(value: &[u8]) -> QueueResult<Box<[u8]>> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(value.len())
            .map_err(|_| QueueError::allocation_failure(value.len()))?;
        storage.extend_from_slice(value);
        Ok(storage.into_boxed_slice())
    }

    /// Store an element in a free slot.
    ///
    /// Must be preceded by a successful [`reserve_slot`](Self::reserve_slot)
    /// for the insertion to be allocation free.
    pub(crate) fn insert(&mut self, element: Element) -> ElementId {
        match self.free_head {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.0], Slot::Occupied(element));
                self.free_head = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot {}", id.0),
                };
                id
            }
            None => {
                self.slots.push(Slot::Occupied(element));
                ElementId(self.slots.len() - 1)
            }
        }
    }

    /// Take an element out of the arena, returning its slot to the free list
    pub(crate) fn remove(&mut self, id: ElementId) -> Element {
        let vacant = Slot::Vacant { next_free: self.free_head };
        match mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(element) => {
                self.free_head = Some(id);
                element
            }
            Slot::Vacant { next_free } => {
                // Put the slot back as it was before reporting the misuse
                self.slots[id.0] = Slot::Vacant { next_free };
                unreachable!("element {} removed twice", id.0)
            }
        }
    }

    pub(crate) fn get(&self, id: ElementId) -> &Element {
        match &self.slots[id.0] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => unreachable!("element {} is vacant", id.0),
        }
    }

    fn get_mut(&mut self, id: ElementId) -> &mut Element {
        match &mut self.slots[id.0] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => unreachable!("element {} is vacant", id.0),
        }
    }

    pub(crate) fn value(&self, id: ElementId) -> &[u8] {
        &self.get(id).value
    }

    pub(crate) fn next(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).next
    }

    pub(crate) fn set_next(&mut self, id: ElementId, next: Option<ElementId>) {
        self.get_mut(id).next = next;
    }
}
