//! In-place chain reversal

use crate::queue::Queue;

impl Queue {
    /// Reverse the queue by relinking its existing elements.
    ///
    /// No element is allocated or released. Queues with fewer than two
    /// elements are left untouched.
    pub fn reverse(&mut self) {
        if self.size < 2 {
            return;
        }

        let mut previous = None;
        let mut current = self.head;
        while let Some(id) = current {
            current = self.elements.next(id);
            self.elements.set_next(id, previous);
            previous = Some(id);
        }

        self.tail = self.head;
        self.head = previous;
    }
}
