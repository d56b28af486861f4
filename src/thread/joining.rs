//! Joining thread implementation

use crate::core::error::panic_message;
use crate::core::{Result, ThreadError};
use std::fmt;
use std::thread::{self, JoinHandle, Scope, ScopedJoinHandle, Thread, ThreadId};

/// The two kinds of handle a [`JoiningThread`] can own.
enum Handle<'scope, T> {
    Owned(JoinHandle<T>),
    Scoped(ScopedJoinHandle<'scope, T>),
}

impl<'scope, T> Handle<'scope, T> {
    fn thread(&self) -> &Thread {
        match self {
            Handle::Owned(h) => h.thread(),
            Handle::Scoped(h) => h.thread(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Handle::Owned(h) => h.is_finished(),
            Handle::Scoped(h) => h.is_finished(),
        }
    }

    fn join(self) -> thread::Result<T> {
        match self {
            Handle::Owned(h) => h.join(),
            Handle::Scoped(h) => h.join(),
        }
    }
}

/// An owner of exactly one thread that joins it when dropped.
///
/// A `JoiningThread` never leaks its thread: if it is still joinable when it
/// goes out of scope (normal return, early return or unwind), the drop blocks
/// until the thread finishes. A panic inside the thread is logged and not
/// re-raised from the drop.
///
/// Free-standing threads are started with [`spawn`](Self::spawn); threads that
/// borrow from the caller's stack are started inside a [`std::thread::scope`]
/// with [`spawn_scoped`](Self::spawn_scoped).
///
/// # Example
///
/// ```rust
/// use rust_concurrent_blocks::JoiningThread;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// # fn main() -> rust_concurrent_blocks::Result<()> {
/// let done = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&done);
///
/// let worker = JoiningThread::spawn(move || flag.store(true, Ordering::SeqCst))?;
/// drop(worker); // blocks until the thread has finished
///
/// assert!(done.load(Ordering::SeqCst));
/// # Ok(())
/// # }
/// ```
pub struct JoiningThread<'scope, T = ()> {
    handle: Option<Handle<'scope, T>>,
}

impl<T: Send + 'static> JoiningThread<'static, T> {
    /// Starts `f` on a new thread and takes ownership of it.
    ///
    /// Arguments are passed by capturing them in the closure.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::SpawnError`] if the OS refuses to create the thread.
    pub fn spawn<F>(f: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = thread::Builder::new()
            .spawn(f)
            .map_err(|e| ThreadError::spawn_with_source("<unnamed>", e))?;

        Ok(Self::from(handle))
    }

    /// Starts `f` on a new thread with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::SpawnError`] if `name` contains a NUL byte or the
    /// OS refuses to create the thread.
    pub fn spawn_named<S, F>(name: S, f: F) -> Result<Self>
    where
        S: Into<String>,
        F: FnOnce() -> T + Send + 'static,
    {
        let name = name.into();
        let handle = named_builder(&name)?
            .spawn(f)
            .map_err(|e| ThreadError::spawn_with_source(name, e))?;

        Ok(Self::from(handle))
    }
}

impl<'scope, T: Send + 'scope> JoiningThread<'scope, T> {
    /// Starts `f` on a thread bound to `scope`, so it may borrow non-`'static` data.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::SpawnError`] if the OS refuses to create the thread.
    pub fn spawn_scoped<'env, F>(scope: &'scope Scope<'scope, 'env>, f: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'scope,
    {
        let handle = thread::Builder::new()
            .spawn_scoped(scope, f)
            .map_err(|e| ThreadError::spawn_with_source("<unnamed>", e))?;

        Ok(Self::from(handle))
    }

    /// Starts `f` on a named thread bound to `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::SpawnError`] if `name` contains a NUL byte or the
    /// OS refuses to create the thread.
    pub fn spawn_scoped_named<'env, S, F>(
        scope: &'scope Scope<'scope, 'env>,
        name: S,
        f: F,
    ) -> Result<Self>
    where
        S: Into<String>,
        F: FnOnce() -> T + Send + 'scope,
    {
        let name = name.into();
        let handle = named_builder(&name)?
            .spawn_scoped(scope, f)
            .map_err(|e| ThreadError::spawn_with_source(name, e))?;

        Ok(Self::from(handle))
    }
}

impl<'scope, T> JoiningThread<'scope, T> {
    /// Creates an owner that holds no thread.
    pub fn empty() -> Self {
        Self { handle: None }
    }

    /// Whether a thread is owned and has not been joined or detached yet.
    pub fn joinable(&self) -> bool {
        self.handle.is_some()
    }

    /// Identifier of the owned thread, or `None` if no thread is owned.
    pub fn id(&self) -> Option<ThreadId> {
        self.thread().map(Thread::id)
    }

    /// The owned thread, or `None` if no thread is owned.
    pub fn thread(&self) -> Option<&Thread> {
        self.handle.as_ref().map(Handle::thread)
    }

    /// Whether the owned thread has finished running. Never blocks.
    ///
    /// Returns `false` when no thread is owned.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_some_and(Handle::is_finished)
    }

    /// Blocks until the owned thread finishes and returns its result.
    ///
    /// After this call the owner is no longer joinable.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::JoinError`] carrying the panic message if the
    /// thread panicked.
    ///
    /// # Panics
    ///
    /// Panics if no thread is owned (never started, already joined or
    /// detached). Checking [`joinable`](Self::joinable) first is the caller's
    /// responsibility.
    pub fn join(&mut self) -> Result<T> {
        match self.handle.take() {
            Some(handle) => Self::join_handle(handle),
            None => panic!("JoiningThread::join called without an owned thread"),
        }
    }

    /// Releases ownership of the thread without waiting for it.
    ///
    /// A free-standing thread keeps running untracked. A scoped thread is
    /// still joined by its [`std::thread::scope`] when the scope ends.
    ///
    /// # Panics
    ///
    /// Panics if no thread is owned, under the same contract as [`join`](Self::join).
    pub fn detach(&mut self) {
        match self.handle.take() {
            Some(handle) => {
                log::debug!("detaching thread {:?}", handle.thread().id());
                drop(handle);
            }
            None => panic!("JoiningThread::detach called without an owned thread"),
        }
    }

    /// Exchanges the threads owned by `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.handle, &mut other.handle);
    }

    /// Moves the owned thread into a new owner, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self {
            handle: self.handle.take(),
        }
    }

    /// Joins the currently owned thread (if any), then takes over `other`'s thread.
    ///
    /// Returns the previous thread's result, or `None` if nothing was owned.
    /// `other`'s thread is taken over even when joining the previous one fails.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::JoinError`] if the previous thread panicked.
    pub fn replace(&mut self, mut other: Self) -> Result<Option<T>> {
        let outcome = match self.handle.take() {
            Some(previous) => Self::join_handle(previous).map(Some),
            None => Ok(None),
        };

        self.handle = other.handle.take();
        outcome
    }

    /// Joins the currently owned thread (if any), then adopts an already running one.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::JoinError`] if the previous thread panicked.
    pub fn adopt<H>(&mut self, handle: H) -> Result<Option<T>>
    where
        H: Into<Self>,
    {
        self.replace(handle.into())
    }

    fn join_handle(handle: Handle<'scope, T>) -> Result<T> {
        let name = handle.thread().name().unwrap_or("<unnamed>").to_string();

        let outcome = handle
            .join()
            .map_err(|payload| ThreadError::join(name.as_str(), panic_message(payload.as_ref())));

        #[cfg(feature = "tracing")]
        crate::tracing::metrics::record_thread_joined(&name, outcome.is_ok());

        outcome
    }
}

/// A builder for a thread called `name`.
///
/// std panics on names it cannot pass to the OS, so they are rejected here.
fn named_builder(name: &str) -> Result<thread::Builder> {
    if name.contains('\0') {
        return Err(ThreadError::spawn(
            name,
            "thread name may not contain interior null bytes",
        ));
    }
    Ok(thread::Builder::new().name(name.to_string()))
}

impl<T> From<JoinHandle<T>> for JoiningThread<'static, T> {
    fn from(handle: JoinHandle<T>) -> Self {
        log::trace!("owning thread {:?}", handle.thread().id());
        Self {
            handle: Some(Handle::Owned(handle)),
        }
    }
}

impl<'scope, T> From<ScopedJoinHandle<'scope, T>> for JoiningThread<'scope, T> {
    fn from(handle: ScopedJoinHandle<'scope, T>) -> Self {
        log::trace!("owning scoped thread {:?}", handle.thread().id());
        Self {
            handle: Some(Handle::Scoped(handle)),
        }
    }
}

impl<'scope, T> Default for JoiningThread<'scope, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'scope, T> fmt::Debug for JoiningThread<'scope, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoiningThread")
            .field("id", &self.id())
            .field("name", &self.thread().and_then(Thread::name))
            .field("joinable", &self.joinable())
            .finish()
    }
}

impl<'scope, T> Drop for JoiningThread<'scope, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = Self::join_handle(handle) {
                log::warn!("{} (panic not propagated from drop)", e);
            }
        }
    }
}
