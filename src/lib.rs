//! Single-table product inventory store.
//!
//! - [`ProductStore`] is the storage contract: list, get, insert, update,
//!   delete, and an atomic [`decrement_quantity`](ProductStore::decrement_quantity).
//! - [`InMemoryProductStore`] and [`FileProductStore`] implement it.
//! - [`router`] resolves product addresses to the collection or one record.
//! - [`ProductProvider`] ties routing, the store, and change notification
//!   together; [`service::InventoryService`] exposes it as named commands,
//!   with an axum transport behind the `http` feature.

pub mod config;
mod error;
pub mod lock;
mod notify;
pub mod product;
mod provider;
pub mod router;
pub mod service;
mod store;

pub use config::Config;
pub use error::InventoryError;
pub use notify::{Change, ChangeKind, ChangeNotifier, CHANGE_EVENT};
pub use product::{contract, NewProduct, Product, ProductPatch};
pub use provider::{ProductProvider, SaleOutcome};
pub use router::Route;
pub use store::{
    FileProductStore, InMemoryProductStore, ProductFilter, ProductStore, SortDirection, SortKey,
    SortOrder, TableSnapshot,
};

// Re-export the decimal type used for prices
pub use rust_decimal::Decimal;
