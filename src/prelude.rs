//! Convenient re-exports for common types and functions

pub use crate::core::{Result, ThreadError};
pub use crate::queue::ThreadSafeQueue;
pub use crate::reduce::{
    parallel_reduce, parallel_reduce_with, parallel_sum, parallel_sum_with, try_parallel_reduce,
    try_parallel_reduce_with, ReduceConfig,
};
pub use crate::stack::ThreadSafeStack;
pub use crate::thread::JoiningThread;
