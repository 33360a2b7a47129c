//! Shared fixtures for the inventory tests.

use inventory_store::{Decimal, NewProduct};

/// Price from a number of cents.
pub fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

/// The product used throughout: Widget, 5.00, from Acme.
pub fn widget(quantity: i64) -> NewProduct {
    NewProduct::new("Widget", cents(500), quantity, "Acme", "555-0100")
}

pub fn gadget(quantity: i64) -> NewProduct {
    NewProduct::new("Gadget", cents(1250), quantity, "Globex", "globex@example.com")
}
