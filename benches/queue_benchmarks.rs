//! Queue Performance Benchmarks
//!
//! Measures insertion and removal throughput (expected O(1) per element),
//! reversal (O(n)) and merge sort (O(n log n)) across queue sizes.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};

use strqueue::queue::{Queue, QueueConfig};

/// Create deterministic, unordered values for benchmarking
fn create_test_values(count: usize) -> Vec<String> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            format!("bench_value_{:016x}", state)
        })
        .collect()
}

fn filled_queue(values: &[String]) -> Queue {
    Queue::from_values(values).expect("Failed to fill benchmark queue")
}

/// Benchmark insertion at either end
fn bench_insert_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_throughput");

    for count in [1_000, 10_000, 100_000] {
        let values = create_test_values(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("insert_tail", count), &values, |b, values| {
            b.iter(|| {
                let mut queue = Queue::new();
                for value in values {
                    queue.insert_tail(value).unwrap();
                }
                black_box(queue.size())
            })
        });

        group.bench_with_input(BenchmarkId::new("insert_head", count), &values, |b, values| {
            b.iter(|| {
                let mut queue = Queue::new();
                for value in values {
                    queue.insert_head(value).unwrap();
                }
                black_box(queue.size())
            })
        });

        // Pre-reserved slots remove arena growth from the measurement
        let config = QueueConfig {
            initial_capacity: count,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("insert_tail_reserved", count), &values, |b, values| {
            b.iter(|| {
                let mut queue = Queue::with_config(&config).unwrap();
                for value in values {
                    queue.insert_tail(value).unwrap();
                }
                black_box(queue.size())
            })
        });
    }

    group.finish();
}

/// Benchmark draining a queue into a caller buffer
fn bench_remove_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_throughput");

    for count in [1_000, 10_000, 100_000] {
        let values = create_test_values(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("remove_head", count), &values, |b, values| {
            b.iter_batched(
                || filled_queue(values),
                |mut queue| {
                    let mut buffer = [0u8; 64];
                    while queue.remove_head(Some(&mut buffer)).is_ok() {
                        black_box(&buffer);
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

/// Benchmark in-place reversal
fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");

    for count in [1_000, 10_000, 100_000] {
        let mut queue = filled_queue(&create_test_values(count));
        group.throughput(Throughput::Elements(count as u64));

        // Reversal is its own inverse, so one queue serves every iteration
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                queue.reverse();
                black_box(queue.peek_head().map(<[u8]>::len))
            })
        });
    }

    group.finish();
}

/// Benchmark merge sort on unordered and already ordered input
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for count in [1_000, 10_000, 100_000] {
        let values = create_test_values(count);
        let mut ordered = values.clone();
        ordered.sort();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("unordered", count), &values, |b, values| {
            b.iter_batched(
                || filled_queue(values),
                |mut queue| {
                    queue.sort();
                    queue
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("ordered", count), &ordered, |b, values| {
            b.iter_batched(
                || filled_queue(values),
                |mut queue| {
                    queue.sort();
                    queue
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    queue_benches,
    bench_insert_throughput,
    bench_remove_throughput,
    bench_reverse,
    bench_sort
);

criterion_main!(queue_benches);
