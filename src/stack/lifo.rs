//! LIFO stack guarded by a single mutex.

use crate::core::{Result, ThreadError};
use parking_lot::Mutex;
use std::fmt;

/// A thread-safe, unbounded LIFO stack.
///
/// [`pop`](Self::pop) checks for emptiness and removes the top element under a
/// single lock acquisition, so a concurrent pop can never slip in between the
/// check and the removal. Popping an empty stack is reported as
/// [`ThreadError::EmptyStack`] instead of blocking or producing a default value.
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::{ThreadError, ThreadSafeStack};
///
/// let stack = ThreadSafeStack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.pop().unwrap(), 2);
/// assert_eq!(stack.pop().unwrap(), 1);
/// assert!(matches!(stack.pop(), Err(ThreadError::EmptyStack)));
/// ```
pub struct ThreadSafeStack<T> {
    items: Mutex<Vec<T>>,
}

impl<T> ThreadSafeStack<T> {
    /// Creates a new empty stack.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Creates a new empty stack with pre-allocated storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Places `value` on top of the stack.
    pub fn push(&self, value: T) {
        self.items.lock().push(value);
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::EmptyStack`] if the stack holds no elements.
    pub fn pop(&self) -> Result<T> {
        self.items.lock().pop().ok_or(ThreadError::EmptyStack)
    }

    /// Whether the stack is currently empty.
    ///
    /// The answer is a snapshot and may be stale by the time it is used.
    pub fn empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Alias of [`empty`](Self::empty).
    pub fn is_empty(&self) -> bool {
        self.empty()
    }

    /// Number of elements at the time of the call.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Exchanges the full contents of `self` and `other`.
    ///
    /// Both locks are held for the exchange. They are always acquired in
    /// ascending address order, so two threads running `a.swap(&b)` and
    /// `b.swap(&a)` at the same time cannot deadlock. Swapping a stack with
    /// itself does nothing.
    pub fn swap(&self, other: &Self) {
        if std::ptr::eq(self, other) {
            return;
        }

        let (first, second) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };

        let mut first_items = first.items.lock();
        let mut second_items = second.items.lock();
        std::mem::swap(&mut *first_items, &mut *second_items);
    }
}

impl<T> Default for ThreadSafeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ThreadSafeStack<T> {
    /// Snapshots the contents under `self`'s lock into a stack with its own mutex.
    fn clone(&self) -> Self {
        let snapshot = self.items.lock().clone();
        Self {
            items: Mutex::new(snapshot),
        }
    }
}

impl<T> Extend<T> for ThreadSafeStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.get_mut().extend(iter);
    }
}

impl<T> FromIterator<T> for ThreadSafeStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Mutex::new(iter.into_iter().collect()),
        }
    }
}

impl<T> fmt::Debug for ThreadSafeStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSafeStack")
            .field("len", &self.len())
            .finish()
    }
}
