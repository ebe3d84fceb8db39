//! Test module organization for the string queue


use crate::queue::Queue;

/// Values head to tail, lossily decoded for readable assertions
pub fn contents(queue: &Queue) -> Vec<String> {
    queue
        .iter()
        .map(|value| String::from_utf8_lossy(value).into_owned())
        .collect()
}

/// Walk the chain and check it against the cached head, tail and size
pub fn assert_consistent(queue: &Queue) {
    let mut count = 0;
    let mut last = None;
    let mut current = queue.head;
    while let Some(id) = current {
        count += 1;
        assert!(count <= queue.size, "chain is longer than size {}", queue.size);
        last = Some(id);
        current = queue.elements.next(id);
    }
    assert_eq!(count, queue.size, "chain length differs from size");
    assert_eq!(last, queue.tail, "tail is not the last element");
    assert_eq!(queue.head.is_none(), queue.size == 0);
    assert_eq!(queue.tail.is_none(), queue.size == 0);
}
