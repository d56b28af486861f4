use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_concurrent_blocks::prelude::*;
use std::sync::Arc;

fn benchmark_parallel_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_sum");

    for size in [1_000usize, 100_000, 1_000_000] {
        let data: Vec<u64> = (0..size as u64).collect();

        group.bench_with_input(BenchmarkId::new("sequential", size), &data, |b, data| {
            b.iter(|| black_box(data.iter().sum::<u64>()));
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &data, |b, data| {
            b.iter(|| black_box(parallel_sum(data, 0).expect("Reduction failed")));
        });
    }

    group.finish();
}

fn benchmark_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    group.bench_function("push_try_pop_1000", |b| {
        let queue = ThreadSafeQueue::new();
        b.iter(|| {
            for i in 0..1000 {
                queue.push(black_box(i));
            }
            while let Some(value) = queue.try_pop() {
                black_box(value);
            }
        });
    });

    group.bench_function("producer_consumer_10000", |b| {
        b.iter_batched(
            || Arc::new(ThreadSafeQueue::new()),
            |queue| {
                let producer = {
                    let queue = Arc::clone(&queue);
                    JoiningThread::spawn(move || {
                        for i in 0..10_000u32 {
                            queue.push(i);
                        }
                    })
                    .expect("Failed to spawn producer")
                };
                for _ in 0..10_000 {
                    black_box(queue.wait_and_pop());
                }
                drop(producer);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn benchmark_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack");

    group.bench_function("push_pop_1000", |b| {
        let stack = ThreadSafeStack::new();
        b.iter(|| {
            for i in 0..1000 {
                stack.push(black_box(i));
            }
            while let Ok(value) = stack.pop() {
                black_box(value);
            }
        });
    });

    group.bench_function("contended_swap_1000", |b| {
        b.iter_batched(
            || {
                let left: Arc<ThreadSafeStack<u32>> = Arc::new((0..100).collect());
                let right: Arc<ThreadSafeStack<u32>> = Arc::new((100..200).collect());
                (left, right)
            },
            |(left, right)| {
                let reversed = {
                    let (left, right) = (Arc::clone(&left), Arc::clone(&right));
                    JoiningThread::spawn(move || {
                        for _ in 0..1000 {
                            right.swap(&left);
                        }
                    })
                    .expect("Failed to spawn swapper")
                };
                for _ in 0..1000 {
                    left.swap(&right);
                }
                drop(reversed);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn benchmark_joining_thread(c: &mut Criterion) {
    c.bench_function("joining_thread_spawn_drop", |b| {
        b.iter(|| {
            let owner = JoiningThread::spawn(|| black_box(1 + 1)).expect("Failed to spawn");
            drop(owner);
        });
    });
}

criterion_group!(
    benches,
    benchmark_parallel_sum,
    benchmark_queue,
    benchmark_stack,
    benchmark_joining_thread
);
criterion_main!(benches);
