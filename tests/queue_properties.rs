// Property-based tests for queue operations
use proptest::prelude::*;
use strqueue::queue::Queue;

fn value_lists() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..12), 0..64)
}

fn collect(queue: &Queue) -> Vec<Vec<u8>> {
    queue.iter().map(<[u8]>::to_vec).collect()
}

fn check_ends(queue: &Queue) {
    let items = collect(queue);
    assert_eq!(items.len(), queue.size());
    assert_eq!(queue.peek_head(), items.first().map(Vec::as_slice));
    assert_eq!(queue.peek_tail(), items.last().map(Vec::as_slice));
}

proptest! {
    #[test]
    fn size_counts_successful_inserts(values in value_lists(), at_head in prop::collection::vec(any::<bool>(), 64)) {
        let mut queue = Queue::new();
        for (i, value) in values.iter().enumerate() {
            if at_head[i] {
                queue.insert_head(value).unwrap();
            } else {
                queue.insert_tail(value).unwrap();
            }
        }
        prop_assert_eq!(queue.size(), values.len());
        check_ends(&queue);
    }

    #[test]
    fn insert_head_then_remove_round_trips(values in value_lists(), value in prop::collection::vec(any::<u8>(), 0..32)) {
        let mut queue = Queue::from_values(&values).unwrap();
        queue.insert_head(&value).unwrap();
        prop_assert_eq!(queue.pop_head(), Some(value));
        prop_assert_eq!(collect(&queue), values);
    }

    #[test]
    fn reverse_is_an_involution(values in value_lists()) {
        let mut queue = Queue::from_values(&values).unwrap();
        queue.reverse();
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(collect(&queue), reversed);
        check_ends(&queue);

        queue.reverse();
        prop_assert_eq!(collect(&queue), values);
        check_ends(&queue);
    }

    #[test]
    fn sort_orders_and_preserves_values(values in value_lists()) {
        let mut queue = Queue::from_values(&values).unwrap();
        queue.sort();

        let sorted = collect(&queue);
        prop_assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(sorted, expected);
        check_ends(&queue);
    }

    #[test]
    fn remove_head_never_overflows(value in prop::collection::vec(1u8..=255, 0..64), capacity in 1usize..32) {
        let mut queue = Queue::from_values([&value]).unwrap();
        let mut buffer = vec![0xaau8; capacity];

        let copied = queue.remove_head(Some(&mut buffer)).unwrap();
        prop_assert!(copied < capacity);
        prop_assert_eq!(copied, value.len().min(capacity - 1));
        prop_assert_eq!(&buffer[..copied], &value[..copied]);
        prop_assert_eq!(buffer[copied], 0);
        prop_assert!(queue.is_empty());
    }
}
