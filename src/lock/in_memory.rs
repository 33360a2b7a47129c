use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::{Lock, LockError, LockManager};

/// Exclusive lock on one product row.
///
/// Only writers take it. Readers go straight to the table's read lock, so a
/// held row never blocks `get` or `list`. Writers queued on the same row are
/// woken one at a time as the holder releases.
#[derive(Default)]
pub struct InMemoryRowLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl InMemoryRowLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn held(&self) -> Result<MutexGuard<'_, bool>, LockError> {
        self.held
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))
    }
}

impl Lock for InMemoryRowLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut held = self
            .released
            .wait_while(self.held()?, |held| *held)
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        *held = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut held = self.held()?;
        // Taken only when it was free.
        Ok(!std::mem::replace(&mut *held, true))
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut held = self.held()?;
        if std::mem::take(&mut *held) {
            self.released.notify_one();
        }
        Ok(())
    }
}

/// Lazily creates one [`InMemoryRowLock`] per product id.
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<u64, Arc<InMemoryRowLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        InMemoryLockManager {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of rows that currently have a lock allocated.
    pub fn tracked(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }
}

impl Default for InMemoryLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryRowLock;

    fn get_lock(&self, id: u64) -> Result<Arc<InMemoryRowLock>, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;
        Ok(locks
            .entry(id)
            .or_insert_with(|| Arc::new(InMemoryRowLock::new()))
            .clone())
    }

    fn forget(&self, id: u64) -> Result<(), LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;
        // Only the map holds it: no guard is alive and nobody is waiting.
        if locks.get(&id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&id);
        }
        Ok(())
    }
}
