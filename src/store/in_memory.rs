//! InMemoryProductStore - BTreeMap-backed products table.
//!
//! Every mutation is staged first and committed second. A durable wrapper
//! hooks in between through a [`Journal`]: it sees the table as it will be
//! after the change, and the change only becomes visible once the journal
//! accepts it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::InventoryError;
use crate::lock::{InMemoryLockManager, LockManager};
use crate::product::{contract, NewProduct, Product, ProductPatch};

use super::{ProductFilter, ProductStore, SortOrder, TableSnapshot};

/// Records the staged table before a change is committed.
pub(crate) type Journal<'a> = &'a dyn Fn(&TableSnapshot) -> Result<(), InventoryError>;

struct Table {
    rows: RwLock<BTreeMap<u64, Product>>,
    next_id: AtomicU64,
    locks: InMemoryLockManager,
    /// Held from staging a change until it is visible in `rows`.
    commit: Mutex<()>,
}

/// A change to one row that has been checked but not yet applied.
enum RowChange {
    Put(Product),
    Remove(u64),
}

impl RowChange {
    fn stage(&self, snapshot: &mut TableSnapshot) {
        // Snapshot products come out of the BTreeMap ordered by id.
        match self {
            RowChange::Put(product) => {
                match snapshot.products.binary_search_by_key(&product.id, |p| p.id) {
                    Ok(at) => snapshot.products[at] = product.clone(),
                    Err(at) => snapshot.products.insert(at, product.clone()),
                }
            }
            RowChange::Remove(id) => snapshot.products.retain(|p| p.id != *id),
        }
    }

    fn apply(self, rows: &mut BTreeMap<u64, Product>) {
        match self {
            RowChange::Put(product) => {
                rows.insert(product.id, product);
            }
            RowChange::Remove(id) => {
                rows.remove(&id);
            }
        }
    }
}

/// In-memory products table.
///
/// Reads take the table's read lock and clone what they return, so a reader
/// never sees a half-written record. Every mutation on an existing row holds
/// that row's lock from the first read to the final write. Clone-friendly via
/// `Arc`; clones share the same table.
#[derive(Clone)]
pub struct InMemoryProductStore {
    table: Arc<Table>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    /// Create an empty table. The first inserted product gets id 1.
    pub fn new() -> Self {
        Self::with_rows(BTreeMap::new(), 1)
    }

    /// Rebuild a table from a snapshot, checking every record on the way in.
    pub fn from_snapshot(snapshot: TableSnapshot) -> Result<Self, InventoryError> {
        let mut rows = BTreeMap::new();
        for product in snapshot.products {
            product.validate()?;
            if product.id == 0 || product.id >= snapshot.next_id {
                return Err(InventoryError::Storage(format!(
                    "product id {} is outside the allocated range (next id {})",
                    product.id, snapshot.next_id
                )));
            }
            let id = product.id;
            if rows.insert(id, product).is_some() {
                return Err(InventoryError::Storage(format!(
                    "duplicate product id {} in snapshot",
                    id
                )));
            }
        }
        Ok(Self::with_rows(rows, snapshot.next_id.max(1)))
    }

    /// Capture the whole table as it is right now.
    pub fn snapshot(&self) -> Result<TableSnapshot, InventoryError> {
        let rows = self.read_rows("snapshot")?;
        // Read after the rows: every id in `rows` was allocated before this load.
        let next_id = self.table.next_id.load(Ordering::SeqCst);
        Ok(TableSnapshot {
            schema_version: contract::DATABASE_VERSION,
            next_id,
            products: rows.values().cloned().collect(),
        })
    }

    /// Number of records in the table.
    pub fn len(&self) -> Result<usize, InventoryError> {
        Ok(self.read_rows("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, InventoryError> {
        Ok(self.len()? == 0)
    }

    /// Hand the current table to `journal` with no commit in flight.
    pub(crate) fn record(&self, journal: Journal<'_>) -> Result<(), InventoryError> {
        let _commit = self.commit_lock()?;
        journal(&self.snapshot()?)
    }

    pub(crate) fn insert_journaled(
        &self,
        product: NewProduct,
        journal: Option<Journal<'_>>,
    ) -> Result<u64, InventoryError> {
        product.validate()?;

        let id = self.table.next_id.fetch_add(1, Ordering::SeqCst);
        self.commit(RowChange::Put(product.into_product(id)), journal)?;

        tracing::info!(id, "inserted product");
        Ok(id)
    }

    pub(crate) fn update_journaled(
        &self,
        id: u64,
        patch: &ProductPatch,
        journal: Option<Journal<'_>>,
    ) -> Result<usize, InventoryError> {
        self.with_row(id, || {
            let current = self.get(id)?;
            if patch.is_empty() {
                return Ok(1);
            }
            let next = patch.apply_to(&current);
            next.validate()?;

            self.commit(RowChange::Put(next), journal)?;
            tracing::info!(id, "updated product");
            Ok(1)
        })
    }

    pub(crate) fn delete_journaled(
        &self,
        id: u64,
        journal: Option<Journal<'_>>,
    ) -> Result<usize, InventoryError> {
        self.with_row(id, || {
            if !self.read_rows("delete")?.contains_key(&id) {
                tracing::debug!(id, "delete of absent product");
                return Ok(0);
            }
            self.commit(RowChange::Remove(id), journal)?;
            tracing::info!(id, "deleted product");
            Ok(1)
        })
    }

    pub(crate) fn decrement_journaled(
        &self,
        id: u64,
        amount: i64,
        journal: Option<Journal<'_>>,
    ) -> Result<i64, InventoryError> {
        if amount < 1 {
            return Err(InventoryError::validation(
                "amount",
                format!("must be at least 1, got {}", amount),
            ));
        }

        self.with_row(id, || {
            let mut product = self.get(id)?;
            let available = product.quantity;
            let remaining = available - amount;
            if remaining < 0 {
                tracing::warn!(id, available, requested = amount, "rejected decrement");
                return Err(InventoryError::InsufficientStock {
                    id,
                    available,
                    requested: amount,
                });
            }

            product.quantity = remaining;
            self.commit(RowChange::Put(product), journal)?;

            tracing::info!(id, remaining, "decremented quantity");
            Ok(remaining)
        })
    }

    fn with_rows(rows: BTreeMap<u64, Product>, next_id: u64) -> Self {
        Self {
            table: Arc::new(Table {
                rows: RwLock::new(rows),
                next_id: AtomicU64::new(next_id),
                locks: InMemoryLockManager::new(),
                commit: Mutex::new(()),
            }),
        }
    }

    /// Run `work` holding the row lock for `id`.
    ///
    /// Rows that do not exist afterwards give their lock back, so lookups of
    /// absent or deleted ids leave nothing behind.
    fn with_row<T>(
        &self,
        id: u64,
        work: impl FnOnce() -> Result<T, InventoryError>,
    ) -> Result<T, InventoryError> {
        let result = {
            let _row = self.table.locks.lock_row(id)?;
            work()
        };
        if !self.read_rows("forget")?.contains_key(&id) {
            self.table.locks.forget(id)?;
        }
        result
    }

    /// Make a staged change visible, journaling the resulting table first.
    ///
    /// A journal failure leaves `rows` untouched.
    fn commit(
        &self,
        change: RowChange,
        journal: Option<Journal<'_>>,
    ) -> Result<(), InventoryError> {
        let _commit = self.commit_lock()?;
        if let Some(journal) = journal {
            let mut staged = self.snapshot()?;
            change.stage(&mut staged);
            journal(&staged)?;
        }
        change.apply(&mut *self.write_rows("commit")?);
        Ok(())
    }

    fn commit_lock(&self) -> Result<MutexGuard<'_, ()>, InventoryError> {
        self.table
            .commit
            .lock()
            .map_err(|_| InventoryError::poisoned("commit"))
    }

    fn read_rows(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, BTreeMap<u64, Product>>, InventoryError> {
        self.table
            .rows
            .read()
            .map_err(|_| InventoryError::poisoned(operation))
    }

    fn write_rows(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<u64, Product>>, InventoryError> {
        self.table
            .rows
            .write()
            .map_err(|_| InventoryError::poisoned(operation))
    }
}

impl ProductStore for InMemoryProductStore {
    fn list(
        &self,
        filter: &ProductFilter,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Product>, InventoryError> {
        let mut products: Vec<Product> = self
            .read_rows("list")?
            .values()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect();

        if let Some(order) = sort {
            order.apply(&mut products);
        }

        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    fn get(&self, id: u64) -> Result<Product, InventoryError> {
        self.read_rows("get")?
            .get(&id)
            .cloned()
            .ok_or(InventoryError::NotFound(id))
    }

    fn insert(&self, product: NewProduct) -> Result<u64, InventoryError> {
        self.insert_journaled(product, None)
    }

    fn update(&self, id: u64, patch: &ProductPatch) -> Result<usize, InventoryError> {
        self.update_journaled(id, patch, None)
    }

    fn delete(&self, id: u64) -> Result<usize, InventoryError> {
        self.delete_journaled(id, None)
    }

    fn decrement_quantity(&self, id: u64, amount: i64) -> Result<i64, InventoryError> {
        self.decrement_journaled(id, amount, None)
    }
}
