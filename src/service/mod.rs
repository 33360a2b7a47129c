//! Command service - named commands over a [`ProductProvider`].
//!
//! `InventoryService<S>` registers the product commands and dispatches JSON
//! input to them. Every transport (in-process calls, HTTP, a message bus)
//! goes through [`InventoryService::dispatch`].
//!
//! ## Commands
//!
//! | Command | Input | Output |
//! |---|---|---|
//! | `product.list` | `address`, optional `filter`, `sort` | `{ "products": [...] }` |
//! | `product.get` | `address` | the product |
//! | `product.insert` | `address`, `product` | `{ "id", "address" }` |
//! | `product.update` | `address`, `patch` | `{ "rows" }` |
//! | `product.delete` | `address` | `{ "rows" }` |
//! | `product.sell` | `address`, optional `amount` (default 1) | `{ "id", "quantity", "soldOut" }` |
//!
//! ## Example
//!
//! ```ignore
//! use inventory_store::service::InventoryService;
//! use inventory_store::InMemoryProductStore;
//! use serde_json::json;
//!
//! let service = InventoryService::new(InMemoryProductStore::new());
//! let product = service.dispatch("product.get", json!({ "address": address }))?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler file exports `COMMAND`, `guard(ctx) -> bool`, and
//! `handle(ctx) -> Result<Value, HandlerError>`, and is registered with
//! [`register_handlers!`](crate::register_handlers).

mod context;
mod error;
pub mod handlers;
mod request;
mod inventory_service;

pub use context::Context;
pub use error::HandlerError;
pub use request::{CommandRequest, CommandResponse};
pub use inventory_service::InventoryService;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str` - the command name
/// - `guard(ctx) -> bool` - input validation
/// - `handle(ctx) -> Result<Value, HandlerError>` - the handler
///
/// # Example
/// ```ignore
/// let service = inventory_store::register_handlers!(
///     InventoryService::empty(ProductProvider::new(store)),
///     handlers::product_get,
///     handlers::product_sell,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
