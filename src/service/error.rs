//! Error types for command handlers.

use thiserror::Error;

use crate::error::InventoryError;

/// Error type for command dispatch.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Input decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the command (required input missing).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// The handler stopped before producing an answer.
    #[error("handler interrupted: {0}")]
    Interrupted(String),
    /// The store, router, or provider refused the operation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Interrupted(_) => 500,
            HandlerError::Inventory(err) => match err {
                InventoryError::Validation { .. } => 422,
                InventoryError::NotFound(_) => 404,
                InventoryError::InsufficientStock { .. } => 409,
                InventoryError::MalformedAddress(_) => 400,
                InventoryError::InvalidIdentifier(_) => 400,
                InventoryError::UnsupportedOperation { .. } => 405,
                InventoryError::Storage(_) => 500,
                InventoryError::Lock(_) => 500,
            },
        }
    }

    /// Stable machine-readable name, so callers can tell outcomes apart
    /// without parsing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::UnknownCommand(_) => "unknown_command",
            HandlerError::DecodeFailed(_) => "decode_failed",
            HandlerError::GuardRejected(_) => "guard_rejected",
            HandlerError::Interrupted(_) => "interrupted",
            HandlerError::Inventory(err) => match err {
                InventoryError::Validation { .. } => "validation",
                InventoryError::NotFound(_) => "not_found",
                InventoryError::InsufficientStock { .. } => "insufficient_stock",
                InventoryError::MalformedAddress(_) => "malformed_address",
                InventoryError::InvalidIdentifier(_) => "invalid_identifier",
                InventoryError::UnsupportedOperation { .. } => "unsupported_operation",
                InventoryError::Storage(_) => "storage",
                InventoryError::Lock(_) => "lock",
            },
        }
    }

    /// JSON error body: `{ "error": <message>, "kind": <kind> }`.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string(), "kind": self.kind() })
    }
}
