//! Blocking FIFO queue guarded by a mutex and a condition variable.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;

/// A thread-safe, unbounded FIFO queue.
///
/// All access to the underlying sequence happens with the queue's mutex held.
/// Consumers either poll with [`try_pop`](Self::try_pop) or block in
/// [`wait_and_pop`](Self::wait_and_pop) until a producer calls
/// [`push`](Self::push). Each push wakes at most one waiting consumer.
///
/// There is no timeout or cancellation on the blocking pop: a consumer waiting
/// on a queue that never receives another element blocks forever.
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::ThreadSafeQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(ThreadSafeQueue::new());
///
/// let consumer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || queue.wait_and_pop())
/// };
///
/// queue.push("hello");
/// assert_eq!(consumer.join().unwrap(), "hello");
/// assert!(queue.try_pop().is_none());
/// ```
pub struct ThreadSafeQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> ThreadSafeQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Creates a new empty queue with pre-allocated storage.
    ///
    /// The queue is still unbounded; `capacity` only avoids early reallocations.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
        }
    }

    /// Appends `value` to the tail and wakes one waiting consumer.
    pub fn push(&self, value: T) {
        {
            let mut items = self.items.lock();
            items.push_back(value);
        }

        self.not_empty.notify_one();
    }

    /// Removes and returns the head, or `None` if the queue is empty. Never blocks.
    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Blocks until the queue is non-empty, then removes and returns the head.
    pub fn wait_and_pop(&self) -> T {
        let mut items = self.items.lock();

        loop {
            // Re-checked after every wakeup, spurious or not
            if let Some(value) = items.pop_front() {
                return value;
            }

            self.not_empty.wait(&mut items);
        }
    }

    /// Whether the queue is currently empty.
    ///
    /// The answer is a snapshot and may be stale by the time it is used.
    pub fn empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Alias of [`empty`](Self::empty).
    pub fn is_empty(&self) -> bool {
        self.empty()
    }

    /// Number of queued elements at the time of the call.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }
}

impl<T> Default for ThreadSafeQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ThreadSafeQueue<T> {
    /// Snapshots the contents under `self`'s lock. The copy gets its own
    /// mutex and condition variable.
    fn clone(&self) -> Self {
        let snapshot = self.items.lock().clone();
        Self {
            items: Mutex::new(snapshot),
            not_empty: Condvar::new(),
        }
    }
}

impl<T> Extend<T> for ThreadSafeQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for ThreadSafeQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Mutex::new(iter.into_iter().collect()),
            not_empty: Condvar::new(),
        }
    }
}

impl<T> fmt::Debug for ThreadSafeQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSafeQueue")
            .field("len", &self.len())
            .finish()
    }
}
