//! Property-based tests for rust_concurrent_blocks using proptest

use proptest::prelude::*;
use rust_concurrent_blocks::prelude::*;
use std::collections::VecDeque;
use std::sync::Arc;

/// Operation applied to both a container and its sequential model.
#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
    ]
}

// ============================================================================
// Container Model Tests
// ============================================================================

proptest! {
    /// The queue behaves like a VecDeque used as a FIFO
    #[test]
    fn test_queue_matches_fifo_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let queue = ThreadSafeQueue::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    queue.push(v);
                    model.push_back(v);
                }
                Op::Pop => {
                    prop_assert_eq!(queue.try_pop(), model.pop_front());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.empty(), model.is_empty());
        }
    }

    /// The stack behaves like a Vec used as a LIFO, failing on empty pops
    #[test]
    fn test_stack_matches_lifo_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let stack = ThreadSafeStack::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    stack.push(v);
                    model.push(v);
                }
                Op::Pop => match (stack.pop(), model.pop()) {
                    (Ok(got), Some(expected)) => {
                        prop_assert_eq!(got, expected);
                    }
                    (Err(ThreadError::EmptyStack), None) => {}
                    (got, expected) => {
                        prop_assert!(false, "stack gave {:?}, model gave {:?}", got, expected);
                    }
                },
            }
            prop_assert_eq!(stack.len(), model.len());
        }
    }

    /// Swapping twice restores both stacks
    #[test]
    fn test_stack_double_swap_roundtrip(
        left in prop::collection::vec(any::<u8>(), 0..50),
        right in prop::collection::vec(any::<u8>(), 0..50)
    ) {
        let a: ThreadSafeStack<u8> = left.iter().copied().collect();
        let b: ThreadSafeStack<u8> = right.iter().copied().collect();

        a.swap(&b);
        prop_assert_eq!(a.len(), right.len());
        prop_assert_eq!(b.len(), left.len());

        b.swap(&a);
        let drained: Vec<u8> = std::iter::from_fn(|| a.pop().ok()).collect();
        let expected: Vec<u8> = left.iter().rev().copied().collect();
        prop_assert_eq!(drained, expected);
    }
}

// ============================================================================
// Concurrent Queue Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every pushed element is delivered exactly once, in order per producer
    #[test]
    fn test_queue_concurrent_delivery(
        producers in 1usize..5,
        per_producer in 1usize..200
    ) {
        let queue = Arc::new(ThreadSafeQueue::new());

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = Arc::clone(&queue);
                JoiningThread::spawn(move || {
                    for seq in 0..per_producer {
                        queue.push((p, seq));
                    }
                })
                .unwrap()
            })
            .collect();

        let mut next = vec![0usize; producers];
        for _ in 0..producers * per_producer {
            let (p, seq) = queue.wait_and_pop();
            prop_assert_eq!(seq, next[p]);
            next[p] += 1;
        }

        drop(handles);
        prop_assert!(queue.empty());
    }
}

// ============================================================================
// Parallel Reduction Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Parallel sum equals the sequential sum for any partitioning
    #[test]
    fn test_sum_matches_sequential(
        data in prop::collection::vec(-1_000_000i64..1_000_000, 0..2_000),
        init in -1_000i64..1_000,
        min_per_partition in 1usize..64,
        max_partitions in 1usize..12
    ) {
        let config = ReduceConfig::new()
            .with_min_per_partition(min_per_partition)
            .with_max_partitions(max_partitions);

        let expected = init + data.iter().sum::<i64>();
        prop_assert_eq!(parallel_sum_with(&config, &data, init).unwrap(), expected);
    }

    /// Non-commutative combine keeps input order
    #[test]
    fn test_concat_preserves_order(
        words in prop::collection::vec("[a-z]{0,4}", 0..300),
        max_partitions in 1usize..9
    ) {
        let config = ReduceConfig::new()
            .with_min_per_partition(3)
            .with_max_partitions(max_partitions);

        let joined = parallel_reduce_with(&config, &words, String::from(">"), |a, b| a + &b).unwrap();
        prop_assert_eq!(joined, format!(">{}", words.concat()));
    }

    /// Partition count stays within 1..=len and never exceeds the cap
    #[test]
    fn test_partition_count_bounds(
        len in 1usize..100_000,
        min_per_partition in 1usize..100,
        max_partitions in 1usize..64
    ) {
        let config = ReduceConfig::new()
            .with_min_per_partition(min_per_partition)
            .with_max_partitions(max_partitions);
        let count = config.partition_count(len);

        prop_assert!(count >= 1);
        prop_assert!(count <= len);
        prop_assert!(count <= max_partitions);
        prop_assert!(count <= len.div_ceil(min_per_partition));
    }
}
