//! Product records and the rules every stored record satisfies.
//!
//! A [`Product`] is one row of the products table. New rows are described by
//! [`NewProduct`] (the store assigns the id) and partial changes by
//! [`ProductPatch`]. All three go through the same validation before
//! anything is written.

pub mod contract;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// One row of the products table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    pub supplier_name: String,
    pub supplier_contact: String,
}

impl Product {
    /// Whether at least one unit is left to sell.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Check the record against the table invariants.
    pub fn validate(&self) -> Result<(), InventoryError> {
        validate_fields(
            &self.name,
            self.price,
            self.quantity,
            &self.supplier_name,
            &self.supplier_contact,
        )
    }
}

/// Fields for a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    pub supplier_name: String,
    pub supplier_contact: String,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        quantity: i64,
        supplier_name: impl Into<String>,
        supplier_contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            supplier_name: supplier_name.into(),
            supplier_contact: supplier_contact.into(),
        }
    }

    pub fn validate(&self) -> Result<(), InventoryError> {
        validate_fields(
            &self.name,
            self.price,
            self.quantity,
            &self.supplier_name,
            &self.supplier_contact,
        )
    }

    /// Attach the id assigned by the store.
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            supplier_name: self.supplier_name,
            supplier_contact: self.supplier_contact,
        }
    }
}

/// A partial update. Only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_contact: Option<String>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn supplier_name(mut self, supplier_name: impl Into<String>) -> Self {
        self.supplier_name = Some(supplier_name.into());
        self
    }

    pub fn supplier_contact(mut self, supplier_contact: impl Into<String>) -> Self {
        self.supplier_contact = Some(supplier_contact.into());
        self
    }

    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.supplier_name.is_none()
            && self.supplier_contact.is_none()
    }

    /// Produce the record that results from applying this patch to `product`.
    ///
    /// The result is not validated; callers run [`Product::validate`] on it.
    pub fn apply_to(&self, product: &Product) -> Product {
        let mut next = product.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(price) = self.price {
            next.price = price;
        }
        if let Some(quantity) = self.quantity {
            next.quantity = quantity;
        }
        if let Some(supplier_name) = &self.supplier_name {
            next.supplier_name = supplier_name.clone();
        }
        if let Some(supplier_contact) = &self.supplier_contact {
            next.supplier_contact = supplier_contact.clone();
        }
        next
    }
}

fn validate_fields(
    name: &str,
    price: Decimal,
    quantity: i64,
    supplier_name: &str,
    supplier_contact: &str,
) -> Result<(), InventoryError> {
    require_text(contract::COLUMN_PRODUCT_NAME, name)?;
    if price < Decimal::ZERO {
        return Err(InventoryError::validation(
            contract::COLUMN_PRODUCT_PRICE,
            format!("must not be negative, got {}", price),
        ));
    }
    if quantity < 0 {
        return Err(InventoryError::validation(
            contract::COLUMN_PRODUCT_QUANTITY,
            format!("must not be negative, got {}", quantity),
        ));
    }
    require_text(contract::COLUMN_PRODUCT_SUPPLIER_NAME, supplier_name)?;
    require_text(contract::COLUMN_PRODUCT_SUPPLIER_CONTACT, supplier_contact)?;
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), InventoryError> {
    if value.trim().is_empty() {
        return Err(InventoryError::validation(field, "is required"));
    }
    Ok(())
}
