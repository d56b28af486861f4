//! Thread-safe FIFO queue.
//!
//! [`ThreadSafeQueue`] guards a `VecDeque` with one mutex and one condition
//! variable. Consumption is either non-blocking ([`ThreadSafeQueue::try_pop`],
//! which reports "nothing available" as `None`) or blocking
//! ([`ThreadSafeQueue::wait_and_pop`], which waits for the next push). The
//! queue never reports an empty-container error.
//!
//! # Example
//!
//! ```rust
//! use rust_concurrent_blocks::queue::ThreadSafeQueue;
//!
//! let queue = ThreadSafeQueue::new();
//! queue.push(1);
//! queue.push(2);
//!
//! assert_eq!(queue.try_pop(), Some(1));
//! assert_eq!(queue.wait_and_pop(), 2);
//! assert_eq!(queue.try_pop(), None);
//! ```

mod fifo;

pub use fifo::ThreadSafeQueue;
