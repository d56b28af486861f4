//! Thread-safe LIFO stack

mod lifo;

pub use lifo::ThreadSafeStack;
