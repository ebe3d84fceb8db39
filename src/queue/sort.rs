//! Merge Sort over the Element Chain
//!
//! Orders a queue ascending by byte-wise lexicographic comparison of its
//! values. Sub-chains are split at their index midpoint, sorted recursively
//! and merged by relinking; values never move and no element is allocated
//! or released. Recursion depth is bounded by log2 of the queue size.

use crate::queue::element::{ElementArena, ElementId};
use crate::queue::Queue;

impl Queue {
    /// Sort the queue ascending. Queues with fewer than two elements are
    /// left untouched.
    pub fn sort(&mut self) {
        if self.size < 2 {
            return;
        }

        self.head = merge_sort(&mut self.elements, self.head, self.size);

        // Tail still names whichever element used to be last
        let mut last = self.head;
        while let Some(id) = last.and_then(|id| self.elements.next(id)) {
            last = Some(id);
        }
        self.tail = last;
    }
}

/// Sort the `len` element chain starting at `start`, returning its new head
fn merge_sort(elements: &mut ElementArena, start: Option<ElementId>, len: usize) -> Option<ElementId> {
    if len <= 1 {
        return start;
    }

    let left_len = (len + 1) / 2;
    let rest = split_off(elements, start, left_len);
    let left = merge_sort(elements, start, left_len);
    let right = merge_sort(elements, rest, len - left_len);
    merge(elements, left, right)
}

/// Terminate the chain after `count` elements and return what followed
fn split_off(elements: &mut ElementArena, start: Option<ElementId>, count: usize) -> Option<ElementId> {
    let mut last = start?;
    for _ in 1..count {
        match elements.next(last) {
            Some(next) => last = next,
            None => return None,
        }
    }
    let rest = elements.next(last);
    elements.set_next(last, None);
    rest
}

/// Merge two sorted chains; on equal values the left element goes first
fn merge(
    elements: &mut ElementArena,
    mut left: Option<ElementId>,
    mut right: Option<ElementId>,
) -> Option<ElementId> {
    let mut head = None;
    let mut last = None;

    loop {
        let taken = match (left, right) {
            (Some(l), Some(r)) => {
                if elements.value(l) > elements.value(r) {
                    right = elements.next(r);
                    r
                } else {
                    left = elements.next(l);
                    l
                }
            }
            (remainder, None) | (None, remainder) => {
                append(elements, &mut head, last, remainder);
                return head;
            }
        };
        append(elements, &mut head, last, Some(taken));
        last = Some(taken);
    }
}

fn append(
    elements: &mut ElementArena,
    head: &mut Option<ElementId>,
    last: Option<ElementId>,
    next: Option<ElementId>,
) {
    match last {
        Some(last) => elements.set_next(last, next),
        None => *head = next,
    }
}
