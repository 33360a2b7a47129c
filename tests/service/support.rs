//! Shared fixtures for the service tests.

use inventory_store::service::InventoryService;
use inventory_store::{contract, InMemoryProductStore};
use serde_json::{json, Value};

pub fn service() -> InventoryService<InMemoryProductStore> {
    InventoryService::new(InMemoryProductStore::new())
}

/// Insert input for the Widget product.
pub fn widget_input(quantity: i64) -> Value {
    json!({
        "address": contract::CONTENT_URI,
        "product": {
            "name": "Widget",
            "price": "5.00",
            "quantity": quantity,
            "supplierName": "Acme",
            "supplierContact": "555-0100"
        }
    })
}
