//! Per-row locking for the product table.
//!
//! A [`LockManager`] hands out one lock per product id. Mutations acquire the
//! row lock through [`LockManager::lock_row`] and hold the returned
//! [`RowGuard`] for the whole read-modify-write, so two writers can never
//! interleave on the same record.

mod error;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use in_memory::{InMemoryLockManager, InMemoryRowLock};
pub use lock::{Lock, RowGuard};
pub use lock_manager::LockManager;
