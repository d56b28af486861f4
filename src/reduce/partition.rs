//! Partition planning and per-partition folding.

use crate::core::error::panic_message;
use crate::core::{Result, ThreadError};
use crossbeam_utils::CachePadded;
use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Output slot of one partition. Padded so neighbouring slots never share a cache line.
pub(crate) type Slot<T> = CachePadded<Option<Result<T>>>;

/// Splits `0..len` into `count` contiguous blocks of `len / count` elements.
///
/// The last block absorbs the remainder. Requires `1 <= count <= len`.
pub(crate) fn plan(len: usize, count: usize) -> Vec<Range<usize>> {
    debug_assert!(count >= 1 && count <= len, "bad partition count {count} for {len}");

    let block_size = len / count;
    (0..count)
        .map(|index| {
            let start = index * block_size;
            let end = if index + 1 == count {
                len
            } else {
                start + block_size
            };
            start..end
        })
        .collect()
}

/// A contiguous block of the input together with the slot its partial result goes to.
pub(crate) struct Partition<'data, 'slot, T> {
    pub(crate) index: usize,
    pub(crate) block: &'data [T],
    pub(crate) slot: &'slot mut Slot<T>,
}

impl<'data, 'slot, T: Clone> Partition<'data, 'slot, T> {
    /// Folds the block with `op` and stores the outcome in the slot.
    ///
    /// A panic in `op` is caught and stored as [`ThreadError::PartitionPanic`].
    pub(crate) fn run<F>(self, op: &F)
    where
        F: Fn(T, T) -> Result<T>,
    {
        let index = self.index;
        let block = self.block;

        let outcome = match catch_unwind(AssertUnwindSafe(|| fold_block(index, block, op))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(ThreadError::partition_panic(
                index,
                panic_message(payload.as_ref()),
            )),
        };

        log::trace!(
            "partition {} ({} elements) finished: {}",
            index,
            block.len(),
            if outcome.is_ok() { "ok" } else { "failed" }
        );

        **self.slot = Some(outcome);
    }
}

/// Folds a non-empty block, starting from its first element.
fn fold_block<T, F>(index: usize, block: &[T], op: &F) -> Result<T>
where
    T: Clone,
    F: Fn(T, T) -> Result<T>,
{
    let (first, rest) = block
        .split_first()
        .ok_or_else(|| ThreadError::other(format!("partition #{} is empty", index)))?;

    rest.iter()
        .try_fold(first.clone(), |acc, item| op(acc, item.clone()))
}
