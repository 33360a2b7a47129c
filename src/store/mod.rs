//! Product stores - CRUD over the products table plus atomic stock decrement.
//!
//! [`ProductStore`] is the contract every backend implements. Two backends
//! ship with the crate:
//!
//! - [`InMemoryProductStore`] keeps the table in a `BTreeMap` behind an
//!   `RwLock`, with a per-row lock for every mutation.
//! - [`FileProductStore`] wraps the in-memory table and writes a JSON
//!   snapshot to disk after every successful mutation.
//!
//! ## Example
//!
//! ```ignore
//! use inventory_store::{InMemoryProductStore, NewProduct, ProductStore};
//! use rust_decimal::Decimal;
//!
//! let store = InMemoryProductStore::new();
//! let id = store.insert(NewProduct::new("Widget", Decimal::new(500, 2), 3, "Acme", "555-0100"))?;
//! assert_eq!(store.decrement_quantity(id, 1)?, 2);
//! ```

mod file;
mod in_memory;
mod query;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::product::{NewProduct, Product, ProductPatch};

pub use file::FileProductStore;
pub use in_memory::InMemoryProductStore;
pub use query::{ProductFilter, SortDirection, SortKey, SortOrder};

/// Storage contract for the products table.
pub trait ProductStore: Send + Sync {
    /// All records matching `filter`, ordered by id unless `sort` is given.
    fn list(
        &self,
        filter: &ProductFilter,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Product>, InventoryError>;

    /// A single record. Fails with `NotFound` if the id is absent.
    fn get(&self, id: u64) -> Result<Product, InventoryError>;

    /// Validate and store a new record. Returns the assigned id.
    fn insert(&self, product: NewProduct) -> Result<u64, InventoryError>;

    /// Apply the provided fields to an existing record.
    ///
    /// Fails with `NotFound` if the id is absent and with `Validation` if the
    /// resulting record breaks an invariant. Returns 1 on success.
    fn update(&self, id: u64, patch: &ProductPatch) -> Result<usize, InventoryError>;

    /// Remove a record. Returns 1 if it existed, 0 otherwise.
    fn delete(&self, id: u64) -> Result<usize, InventoryError>;

    /// Atomically reduce the quantity by `amount` and return what is left.
    ///
    /// Fails with `InsufficientStock` if the result would be negative.
    fn decrement_quantity(&self, id: u64, amount: i64) -> Result<i64, InventoryError>;

    /// `update` with at-most-one-row semantics: an absent id yields 0.
    fn update_rows(&self, id: u64, patch: &ProductPatch) -> Result<usize, InventoryError> {
        match self.update(id, patch) {
            Err(InventoryError::NotFound(_)) => Ok(0),
            other => other,
        }
    }

    /// Every record in id order.
    fn list_all(&self) -> Result<Vec<Product>, InventoryError> {
        self.list(&ProductFilter::default(), None)
    }
}

/// On-disk form of the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub schema_version: u32,
    pub next_id: u64,
    pub products: Vec<Product>,
}
