use thiserror::Error;

use crate::lock::LockError;

/// Every failure a store, router, or provider operation can report.
///
/// `Validation`, `NotFound`, and `InsufficientStock` are the outcomes a
/// presentation layer is expected to tell apart. The routing variants come
/// from address resolution; `Storage` and `Lock` are infrastructure faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("product not found: {0}")]
    NotFound(u64),

    #[error("insufficient stock for product {id}: {available} available, {requested} requested")]
    InsufficientStock {
        id: u64,
        available: i64,
        requested: i64,
    },

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("invalid identifier in address: {0}")]
    InvalidIdentifier(String),

    #[error("{verb} is not supported on {address}")]
    UnsupportedOperation { verb: &'static str, address: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Lock(#[from] LockError),
}

impl InventoryError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        InventoryError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn poisoned(operation: &'static str) -> Self {
        InventoryError::Lock(LockError::Poisoned(format!("product table during {}", operation)))
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Storage(err.to_string())
    }
}
