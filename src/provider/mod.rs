//! ProductProvider - address-based access to a product store.
//!
//! The provider is the one entry point transports talk to. It resolves the
//! address, checks the verb fits the address shape, runs the store
//! operation, and announces the change to observers.
//!
//! | Verb | Collection address | Single-record address |
//! |---|---|---|
//! | `query` | matching records | the record (zero or one) |
//! | `get` | unsupported | the record or `NotFound` |
//! | `insert` | new record address | unsupported |
//! | `update` | unsupported | rows affected |
//! | `delete` | unsupported | rows affected |
//! | `sell` | unsupported | remaining stock |

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::notify::{Change, ChangeKind, ChangeNotifier};
use crate::product::{contract, NewProduct, Product, ProductPatch};
use crate::router::{self, Route};
use crate::store::{ProductFilter, ProductStore, SortOrder};

/// Result of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOutcome {
    pub id: u64,
    /// Units left after the sale.
    pub quantity: i64,
    /// The sale took the last unit.
    pub sold_out: bool,
}

/// Routes addresses to a [`ProductStore`] and notifies observers of changes.
pub struct ProductProvider<S> {
    store: S,
    notifier: ChangeNotifier,
}

impl<S: ProductStore> ProductProvider<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Where observers subscribe to changes.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Content type of the data behind an address.
    pub fn content_type(&self, address: &str) -> Result<&'static str, InventoryError> {
        router::content_type(address)
    }

    /// Records behind an address.
    ///
    /// On a single-record address the filter still applies, and an absent id
    /// yields an empty list rather than `NotFound`.
    pub fn query(
        &self,
        address: &str,
        filter: &ProductFilter,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Product>, InventoryError> {
        match router::resolve(address)? {
            Route::Products => self.store.list(filter, sort),
            Route::ProductId(id) => match self.store.get(id) {
                Ok(product) if filter.matches(&product) => Ok(vec![product]),
                Ok(_) | Err(InventoryError::NotFound(_)) => Ok(Vec::new()),
                Err(err) => Err(err),
            },
        }
    }

    /// The single record behind an item address.
    pub fn get(&self, address: &str) -> Result<Product, InventoryError> {
        let id = item(address, "get")?;
        self.store.get(id)
    }

    /// Insert through the collection address. Returns the new record's address.
    pub fn insert(&self, address: &str, product: NewProduct) -> Result<String, InventoryError> {
        if router::resolve(address)? != Route::Products {
            return Err(unsupported("insert", address));
        }
        let id = self.store.insert(product)?;
        self.notifier.notify(Change::new(ChangeKind::Inserted, id));
        Ok(contract::item_address(id))
    }

    /// Update the record behind an item address. Returns rows affected.
    pub fn update(&self, address: &str, patch: &ProductPatch) -> Result<usize, InventoryError> {
        let id = item(address, "update")?;
        let rows = self.store.update(id, patch)?;
        if !patch.is_empty() {
            self.notifier.notify(Change::new(ChangeKind::Updated, id));
        }
        Ok(rows)
    }

    /// Delete the record behind an item address. Returns rows affected.
    pub fn delete(&self, address: &str) -> Result<usize, InventoryError> {
        let id = item(address, "delete")?;
        let rows = self.store.delete(id)?;
        if rows > 0 {
            self.notifier.notify(Change::new(ChangeKind::Deleted, id));
        }
        Ok(rows)
    }

    /// Sell `amount` units of the record behind an item address.
    pub fn sell(&self, address: &str, amount: i64) -> Result<SaleOutcome, InventoryError> {
        let id = item(address, "sell")?;
        let quantity = self.store.decrement_quantity(id, amount)?;
        let sold_out = quantity == 0;

        self.notifier.notify(Change::new(ChangeKind::Sold, id));
        if sold_out {
            tracing::info!(id, "product sold out");
            self.notifier.notify(Change::new(ChangeKind::SoldOut, id));
        }

        Ok(SaleOutcome {
            id,
            quantity,
            sold_out,
        })
    }
}

fn item(address: &str, verb: &'static str) -> Result<u64, InventoryError> {
    router::resolve(address)?
        .id()
        .ok_or_else(|| unsupported(verb, address))
}

fn unsupported(verb: &'static str, address: &str) -> InventoryError {
    InventoryError::UnsupportedOperation {
        verb,
        address: address.to_string(),
    }
}
