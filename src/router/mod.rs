//! Address routing.
//!
//! Resolves a product address to a [`Route`]: either the whole collection or
//! one record by id. The address table is built once per process and never
//! changes afterwards.
//!
//! | Address | Route |
//! |---|---|
//! | `content://com.example.android.inventoryapp/products` | [`Route::Products`] |
//! | `content://com.example.android.inventoryapp/products/7` | [`Route::ProductId`]`(7)` |

use std::fmt;
use std::sync::LazyLock;

use crate::error::InventoryError;
use crate::product::contract;

/// What an address points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// All products.
    Products,
    /// A single product.
    ProductId(u64),
}

impl Route {
    /// The canonical address for this route.
    pub fn address(&self) -> String {
        match self {
            Route::Products => contract::CONTENT_URI.to_string(),
            Route::ProductId(id) => contract::item_address(*id),
        }
    }

    /// Content type of the data behind this route.
    pub fn content_type(&self) -> &'static str {
        match self {
            Route::Products => contract::CONTENT_LIST_TYPE,
            Route::ProductId(_) => contract::CONTENT_ITEM_TYPE,
        }
    }

    /// The id of a single-record route.
    pub fn id(&self) -> Option<u64> {
        match self {
            Route::Products => None,
            Route::ProductId(id) => Some(*id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

/// Matches addresses of the form `<scheme>://<authority>/<collection>[/<id>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    prefix: String,
    collection: &'static str,
}

static PRODUCTS: LazyLock<Router> = LazyLock::new(|| {
    Router::new(
        contract::CONTENT_SCHEME,
        contract::CONTENT_AUTHORITY,
        contract::PATH_PRODUCTS,
    )
});

impl Router {
    fn new(scheme: &str, authority: &str, collection: &'static str) -> Self {
        Self {
            prefix: format!("{}://{}/", scheme, authority),
            collection,
        }
    }

    /// The process-wide router for product addresses.
    pub fn products() -> &'static Router {
        &PRODUCTS
    }

    /// Resolve an address.
    ///
    /// Fails with `MalformedAddress` when the address has neither the
    /// collection nor the collection-plus-id shape, and with
    /// `InvalidIdentifier` when the id segment is not a non-negative integer.
    pub fn resolve(&self, address: &str) -> Result<Route, InventoryError> {
        let malformed = || InventoryError::MalformedAddress(address.to_string());

        let path = address.strip_prefix(&self.prefix).ok_or_else(malformed)?;
        let mut segments = path.split('/');

        if segments.next() != Some(self.collection) {
            return Err(malformed());
        }

        match (segments.next(), segments.next()) {
            (None, _) => Ok(Route::Products),
            (Some(id), None) => parse_id(id).map(Route::ProductId),
            _ => Err(malformed()),
        }
    }
}

fn parse_id(segment: &str) -> Result<u64, InventoryError> {
    let invalid = || InventoryError::InvalidIdentifier(segment.to_string());
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    segment.parse::<u64>().map_err(|_| invalid())
}

/// Resolve an address with the product router.
pub fn resolve(address: &str) -> Result<Route, InventoryError> {
    Router::products().resolve(address)
}

/// Content type for an address, or the routing error.
pub fn content_type(address: &str) -> Result<&'static str, InventoryError> {
    resolve(address).map(|route| route.content_type())
}
