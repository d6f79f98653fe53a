//! A value box with serialized access.

use std::fmt;
use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// One value shared across threads, where every read and write is a single
/// critical section.
///
/// At most one of [`get`](Self::get), [`set`](Self::set),
/// [`update`](Self::update), [`replace`](Self::replace) or
/// [`with`](Self::with) runs against the value at any instant. Other callers
/// block until it finishes. Readers never observe a partially written value.
///
/// There is no global instance. Share a `Guarded` by reference (for example
/// with [`std::thread::scope`]) or behind an `Arc`; it lives as long as its
/// owner.
///
/// Prefer [`update`](Self::update) for read-modify-write. A `get` followed by a
/// `set` is two critical sections, and concurrent writers can slip in between.
///
/// # Reentrancy
///
/// Closures passed to `update` and `with` run while the lock is held. Calling
/// any method on the same `Guarded` from inside one of them deadlocks or
/// panics. The closures receive the value, not the container, so this can only
/// happen when the container itself was captured. Keeping critical sections
/// free of such calls is the caller's obligation.
///
/// # Panics in closures
///
/// A closure that panics does not make the box unusable. The next caller
/// recovers the lock and sees whatever state the closure left behind.
pub struct Guarded<T> {
    value: Mutex<T>,
}

impl<T> Guarded<T> {
    pub const fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        self.value.lock().unwrap_or_else(|poisoned| {
            let guard = poisoned.into_inner();
            self.value.clear_poison();
            tracing::warn!("Recovered guarded value after a panic inside its critical section");
            guard
        })
    }

    /// A copy of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.lock().clone()
    }

    /// Replace the current value.
    ///
    /// The previous value is dropped after the lock is released.
    pub fn set(&self, value: T) {
        drop(self.replace(value));
    }

    /// Replace the current value and return the previous one.
    pub fn replace(&self, value: T) -> T {
        mem::replace(&mut *self.lock(), value)
    }

    /// Apply `mutator` as one atomic read-modify-write.
    pub fn update<R>(&self, mutator: impl FnOnce(&mut T) -> R) -> R {
        mutator(&mut *self.lock())
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.lock())
    }

    /// Direct access; exclusive ownership already rules out other callers.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Default> Default for Guarded<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Guarded<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// Uses try_lock so formatting from inside a critical section cannot deadlock.
impl<T: fmt::Debug> fmt::Debug for Guarded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Guarded");
        match self.value.try_lock() {
            Ok(guard) => debug.field("value", &&*guard),
            Err(TryLockError::Poisoned(poisoned)) => {
                debug.field("value", &&*poisoned.into_inner())
            }
            Err(TryLockError::WouldBlock) => debug.field("value", &format_args!("<locked>")),
        };
        debug.finish()
    }
}
