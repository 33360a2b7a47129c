//! FileProductStore - durable products table.
//!
//! Wraps an [`InMemoryProductStore`] and journals every mutation to a JSON
//! snapshot file before the change becomes visible. The snapshot is written
//! to a sibling `.tmp` file and renamed into place, so the file on disk is
//! always a complete table. When the write fails the mutation is not applied.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::InventoryError;
use crate::product::{contract, NewProduct, Product, ProductPatch};

use super::{InMemoryProductStore, ProductFilter, ProductStore, SortOrder, TableSnapshot};

/// Products table persisted to a single JSON file.
pub struct FileProductStore {
    inner: InMemoryProductStore,
    path: PathBuf,
}

impl FileProductStore {
    /// Open the table stored at `path`, creating an empty one if the file
    /// does not exist yet.
    ///
    /// A snapshot written by an older schema version is bumped to the current
    /// version; one written by a newer version is refused.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let (inner, needs_write) = if path.exists() {
            let bytes = fs::read(&path)?;
            let snapshot: TableSnapshot = serde_json::from_slice(&bytes)?;
            let outdated = check_version(&path, snapshot.schema_version)?;
            (InMemoryProductStore::from_snapshot(snapshot)?, outdated)
        } else {
            tracing::info!(path = %path.display(), "creating empty product table");
            (InMemoryProductStore::new(), true)
        };

        let store = Self { inner, path };
        if needs_write {
            store.persist()?;
        }

        tracing::info!(
            path = %store.path.display(),
            products = store.inner.len()?,
            "opened product table"
        );
        Ok(store)
    }

    /// Open `DATABASE_NAME` inside `dir`.
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self, InventoryError> {
        Self::open(dir.as_ref().join(contract::DATABASE_NAME))
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory table this store persists.
    pub fn inner(&self) -> &InMemoryProductStore {
        &self.inner
    }

    /// Write the current table to disk.
    pub fn persist(&self) -> Result<(), InventoryError> {
        let journal = |snapshot: &TableSnapshot| self.write(snapshot);
        self.inner.record(&journal)
    }

    fn write(&self, snapshot: &TableSnapshot) -> Result<(), InventoryError> {
        let written = serde_json::to_vec_pretty(snapshot)
            .map_err(InventoryError::from)
            .and_then(|bytes| {
                let tmp = self.tmp_path();
                let mut file = File::create(&tmp)?;
                file.write_all(&bytes)?;
                file.sync_all()?;
                fs::rename(&tmp, &self.path)?;
                Ok(())
            });

        match &written {
            Ok(()) => tracing::debug!(
                path = %self.path.display(),
                products = snapshot.products.len(),
                "persisted product table"
            ),
            Err(err) => tracing::error!(
                path = %self.path.display(),
                error = %err,
                "failed to persist product table"
            ),
        }
        written
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Returns whether the snapshot needs rewriting at the current version.
fn check_version(path: &Path, found: u32) -> Result<bool, InventoryError> {
    if found > contract::DATABASE_VERSION {
        return Err(InventoryError::Storage(format!(
            "{} has schema version {}, newer than supported version {}",
            path.display(),
            found,
            contract::DATABASE_VERSION
        )));
    }
    if found < contract::DATABASE_VERSION {
        tracing::info!(
            path = %path.display(),
            from = found,
            to = contract::DATABASE_VERSION,
            "upgrading product table schema version"
        );
        return Ok(true);
    }
    Ok(false)
}

impl ProductStore for FileProductStore {
    fn list(
        &self,
        filter: &ProductFilter,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Product>, InventoryError> {
        self.inner.list(filter, sort)
    }

    fn get(&self, id: u64) -> Result<Product, InventoryError> {
        self.inner.get(id)
    }

    fn insert(&self, product: NewProduct) -> Result<u64, InventoryError> {
        let journal = |snapshot: &TableSnapshot| self.write(snapshot);
        self.inner.insert_journaled(product, Some(&journal))
    }

    fn update(&self, id: u64, patch: &ProductPatch) -> Result<usize, InventoryError> {
        let journal = |snapshot: &TableSnapshot| self.write(snapshot);
        self.inner.update_journaled(id, patch, Some(&journal))
    }

    fn delete(&self, id: u64) -> Result<usize, InventoryError> {
        let journal = |snapshot: &TableSnapshot| self.write(snapshot);
        self.inner.delete_journaled(id, Some(&journal))
    }

    fn decrement_quantity(&self, id: u64, amount: i64) -> Result<i64, InventoryError> {
        let journal = |snapshot: &TableSnapshot| self.write(snapshot);
        self.inner.decrement_journaled(id, amount, Some(&journal))
    }
}
