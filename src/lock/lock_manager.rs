use std::sync::Arc;

use super::{Lock, LockError, RowGuard};

/// Factory for per-row locks.
///
/// Repeated calls with the same id must return the same logical lock.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) the lock for a product id.
    fn get_lock(&self, id: u64) -> Result<Arc<Self::Lock>, LockError>;

    /// Drop bookkeeping for a row that no longer exists.
    ///
    /// Implementations must keep the lock if anyone still holds or waits on it.
    fn forget(&self, _id: u64) -> Result<(), LockError> {
        Ok(())
    }

    /// Block until the row is free, then hold it until the guard drops.
    fn lock_row(&self, id: u64) -> Result<RowGuard<Self::Lock>, LockError> {
        let lock = self.get_lock(id)?;
        lock.lock()?;
        Ok(RowGuard::acquired(id, lock))
    }

    /// Take the row only if nobody else holds it.
    fn try_lock_row(&self, id: u64) -> Result<Option<RowGuard<Self::Lock>>, LockError> {
        let lock = self.get_lock(id)?;
        if lock.try_lock()? {
            Ok(Some(RowGuard::acquired(id, lock)))
        } else {
            Ok(None)
        }
    }
}
