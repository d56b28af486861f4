//! # Rust Concurrent Blocks
//!
//! Small, lock-disciplined building blocks for multi-threaded programs.
//!
//! ## Features
//!
//! - **Joining Thread**: [`JoiningThread`] owns exactly one thread and joins it when dropped
//! - **Thread-Safe Queue**: [`ThreadSafeQueue`], a mutex + condvar FIFO with blocking and non-blocking pops
//! - **Thread-Safe Stack**: [`ThreadSafeStack`], a mutex LIFO whose pop reports emptiness as an error
//! - **Parallel Reduction**: [`parallel_reduce`] and friends, fork-join partition-and-combine over slices
//! - **Thread Safety**: Built on parking_lot and crossbeam-utils
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_concurrent_blocks::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let queue = Arc::new(ThreadSafeQueue::new());
//!
//! // The producer is joined when `producer` goes out of scope
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     JoiningThread::spawn(move || {
//!         for i in 0..10 {
//!             queue.push(i);
//!         }
//!     })?
//! };
//!
//! let received: Vec<i32> = (0..10).map(|_| queue.wait_and_pop()).collect();
//! assert_eq!(received, (0..10).collect::<Vec<_>>());
//! drop(producer);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread-Safe Stack
//!
//! ```rust
//! use rust_concurrent_blocks::prelude::*;
//!
//! let a = ThreadSafeStack::new();
//! let b = ThreadSafeStack::new();
//! a.push("from a");
//! b.push("from b");
//!
//! // Deadlock-free even when another thread runs `b.swap(&a)` concurrently
//! a.swap(&b);
//! assert_eq!(a.pop().unwrap(), "from b");
//! assert!(matches!(a.pop(), Err(ThreadError::EmptyStack)));
//! ```
//!
//! ## Parallel Reduction
//!
//! ```rust
//! use rust_concurrent_blocks::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let data: Vec<u64> = (1..=100).collect();
//! assert_eq!(parallel_sum(&data, 0)?, 5050);
//!
//! // Fix the partition count for machine-independent combine order
//! let config = ReduceConfig::new().with_max_partitions(4);
//! let product = parallel_reduce_with(&config, &data[..10], 1, |a, b| a * b)?;
//! assert_eq!(product, 3_628_800);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod prelude;
pub mod queue;
pub mod reduce;
pub mod stack;
pub mod thread;
pub mod tracing;

pub use crate::core::{Result, ThreadError};
pub use queue::ThreadSafeQueue;
pub use reduce::{
    parallel_reduce, parallel_reduce_with, parallel_sum, parallel_sum_with, try_parallel_reduce,
    try_parallel_reduce_with, ReduceConfig,
};
pub use stack::ThreadSafeStack;
pub use thread::JoiningThread;
