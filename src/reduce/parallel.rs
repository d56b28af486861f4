//! Fork-join reduction driver.

use super::config::ReduceConfig;
use super::partition::{self, Partition, Slot};
use crate::core::{Result, ThreadError};
use crate::thread::JoiningThread;
use crossbeam_utils::CachePadded;
use std::ops::Add;
use std::thread;

/// Reduces `data` with `op`, splitting the work across threads.
///
/// `op` must be associative. It need not be commutative: partial results
/// are combined with `init` strictly in input order. Empty input returns
/// `init` without spawning any thread.
///
/// Uses [`ReduceConfig::default()`]; see [`parallel_reduce_with`] to control
/// partitioning.
///
/// # Errors
///
/// Returns [`ThreadError::PartitionPanic`] if `op` panicked inside a
/// partition, or a spawn error if a partition thread could not be created.
/// Errors are only reported after every spawned thread has been joined.
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::parallel_reduce;
///
/// let data: Vec<u64> = (1..=100).collect();
/// let max = parallel_reduce(&data, 0, |a, b| a.max(b)).unwrap();
/// assert_eq!(max, 100);
/// ```
pub fn parallel_reduce<T, F>(data: &[T], init: T, op: F) -> Result<T>
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    parallel_reduce_with(&ReduceConfig::default(), data, init, op)
}

/// [`parallel_reduce`] with explicit partitioning settings.
///
/// # Errors
///
/// As [`parallel_reduce`], plus [`ThreadError::InvalidConfig`] for an invalid `config`.
pub fn parallel_reduce_with<T, F>(config: &ReduceConfig, data: &[T], init: T, op: F) -> Result<T>
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    try_parallel_reduce_with(config, data, init, move |acc, item| Ok(op(acc, item)))
}

/// Reduces `data` with a fallible `op`.
///
/// # Errors
///
/// Returns the error of the lowest-indexed failing partition (or of the final
/// combine). Failures of other partitions are logged.
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::{try_parallel_reduce, ThreadError};
///
/// let data: Vec<u8> = vec![200; 40];
/// let sum = try_parallel_reduce(&data, 0u8, |a, b| {
///     a.checked_add(b).ok_or_else(|| ThreadError::other("overflow"))
/// });
/// assert!(sum.is_err());
/// ```
pub fn try_parallel_reduce<T, F>(data: &[T], init: T, op: F) -> Result<T>
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> Result<T> + Sync,
{
    try_parallel_reduce_with(&ReduceConfig::default(), data, init, op)
}

/// Sums `data` onto `init` in parallel.
///
/// # Errors
///
/// As [`parallel_reduce`].
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::parallel_sum;
///
/// let data: Vec<i64> = (1..=100).collect();
/// assert_eq!(parallel_sum(&data, 0).unwrap(), 5050);
/// ```
pub fn parallel_sum<T>(data: &[T], init: T) -> Result<T>
where
    T: Clone + Send + Sync + Add<Output = T>,
{
    parallel_reduce(data, init, |a, b| a + b)
}

/// [`parallel_sum`] with explicit partitioning settings.
///
/// # Errors
///
/// As [`parallel_reduce_with`].
pub fn parallel_sum_with<T>(config: &ReduceConfig, data: &[T], init: T) -> Result<T>
where
    T: Clone + Send + Sync + Add<Output = T>,
{
    parallel_reduce_with(config, data, init, |a, b| a + b)
}

/// [`try_parallel_reduce`] with explicit partitioning settings.
///
/// Every partition but the last runs on its own [`JoiningThread`]; the last
/// one is reduced on the calling thread.
///
/// # Errors
///
/// As [`try_parallel_reduce`], plus [`ThreadError::InvalidConfig`] for an
/// invalid `config`.
pub fn try_parallel_reduce_with<T, F>(
    config: &ReduceConfig,
    data: &[T],
    init: T,
    op: F,
) -> Result<T>
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> Result<T> + Sync,
{
    config.validate()?;

    if data.is_empty() {
        return Ok(init);
    }

    let count = config.partition_count(data.len());
    let ranges = partition::plan(data.len(), count);
    log::debug!(
        "reducing {} elements in {} partitions of ~{}",
        data.len(),
        count,
        data.len() / count
    );

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("reduce", len = data.len(), partitions = count).entered();
    #[cfg(feature = "tracing")]
    let start = std::time::Instant::now();

    let mut slots: Vec<Slot<T>> = (0..count).map(|_| CachePadded::new(None)).collect();
    let op = &op;

    let thread_failures = thread::scope(|scope| {
        let mut partitions: Vec<Partition<'_, '_, T>> = ranges
            .into_iter()
            .zip(slots.iter_mut())
            .enumerate()
            .map(|(index, (range, slot))| Partition {
                index,
                block: &data[range],
                slot,
            })
            .collect();
        let local = partitions.pop();

        let mut workers = Vec::with_capacity(partitions.len());
        let mut failures = Vec::new();

        for partition in partitions {
            let index = partition.index;
            let name = format!("{}-{}", config.thread_name_prefix, index);

            #[cfg(feature = "tracing")]
            crate::tracing::metrics::record_partition_spawned(index, partition.block.len());

            match JoiningThread::spawn_scoped_named(scope, name, move || partition.run(op)) {
                Ok(worker) => workers.push((index, worker)),
                Err(e) => {
                    log::warn!("partition {} not started: {}", index, e);
                    failures.push((index, e));
                }
            }
        }

        if let Some(partition) = local {
            partition.run(op);
        }

        for (index, mut worker) in workers {
            if let Err(e) = worker.join() {
                let e = match e {
                    ThreadError::JoinError { message, .. } => {
                        ThreadError::partition_panic(index, message)
                    }
                    other => other,
                };
                failures.push((index, e));
            }
        }

        failures
    });

    record_failures(&mut slots, thread_failures);
    let outcome = combine(slots, init, op);

    #[cfg(feature = "tracing")]
    crate::tracing::metrics::record_reduce_complete(
        data.len(),
        count,
        start.elapsed(),
        outcome.is_ok(),
    );

    outcome
}

/// Stores spawn and join failures in the slots of partitions that left no result.
fn record_failures<T>(slots: &mut [Slot<T>], failures: Vec<(usize, ThreadError)>) {
    for (index, e) in failures {
        match slots.get_mut(index) {
            Some(slot) if slot.is_none() => **slot = Some(Err(e)),
            _ => log::debug!("partition {} already settled, dropping {}", index, e),
        }
    }
}

/// Folds the partials onto `init` in partition order, or reports the first failure.
fn combine<T, F>(slots: Vec<Slot<T>>, init: T, op: &F) -> Result<T>
where
    F: Fn(T, T) -> Result<T>,
{
    let mut partials = Vec::with_capacity(slots.len());
    let mut failure: Option<ThreadError> = None;

    for (index, slot) in slots.into_iter().enumerate() {
        let outcome = CachePadded::into_inner(slot).unwrap_or_else(|| {
            Err(ThreadError::partition_panic(index, "partition produced no result"))
        });

        match outcome {
            Ok(partial) => partials.push(partial),
            Err(e) if failure.is_none() => failure = Some(e),
            Err(e) => log::warn!("partition {} also failed: {}", index, e),
        }
    }

    if let Some(e) = failure {
        return Err(e);
    }

    partials
        .into_iter()
        .try_fold(init, op)
}
