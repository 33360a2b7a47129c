use std::sync::Arc;

use super::LockError;

/// A single row lock.
///
/// `lock` blocks until the row is free; `try_lock` never blocks.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Holds a row lock until dropped.
#[must_use = "the row is unlocked as soon as the guard is dropped"]
pub struct RowGuard<L: Lock> {
    id: u64,
    lock: Arc<L>,
}

impl<L: Lock> RowGuard<L> {
    /// Wrap an already-acquired lock.
    pub(crate) fn acquired(id: u64, lock: Arc<L>) -> Self {
        RowGuard { id, lock }
    }

    /// The row this guard protects.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl<L: Lock> Drop for RowGuard<L> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            tracing::error!(id = self.id, error = %err, "failed to release row lock");
        }
    }
}
