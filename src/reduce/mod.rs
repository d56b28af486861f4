//! Fork-join parallel reduction over slices.
//!
//! The input is split into contiguous blocks, one per execution unit. Every
//! block except the last is reduced on its own [`JoiningThread`]; the last is
//! reduced on the calling thread. Each unit writes into its own result slot,
//! so no locking is needed during the reduction. Once every thread has been
//! joined, the partial results are folded onto the initial value in block
//! order.
//!
//! The number of blocks is bounded by hardware concurrency (or
//! [`ReduceConfig::max_partitions`]) and by the input length divided by
//! [`ReduceConfig::min_per_partition`], so small inputs are not
//! over-partitioned. Block boundaries depend only on the input length and the
//! partition count, which makes results deterministic for a fixed count.
//!
//! # Example
//!
//! ```rust
//! use rust_concurrent_blocks::reduce::{parallel_sum_with, ReduceConfig};
//!
//! # fn main() -> rust_concurrent_blocks::Result<()> {
//! let data: Vec<u32> = (1..=100).collect();
//! let config = ReduceConfig::new().with_max_partitions(4);
//!
//! assert_eq!(parallel_sum_with(&config, &data, 0)?, 5050);
//! # Ok(())
//! # }
//! ```
//!
//! [`JoiningThread`]: crate::thread::JoiningThread

mod config;
mod parallel;
mod partition;

pub use config::{hardware_concurrency, ReduceConfig, DEFAULT_MIN_PER_PARTITION, FALLBACK_CONCURRENCY};
pub use parallel::{
    parallel_reduce, parallel_reduce_with, parallel_sum, parallel_sum_with, try_parallel_reduce,
    try_parallel_reduce_with,
};
