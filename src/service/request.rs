//! Framework-agnostic request/response types for command dispatch.
//!
//! These bridge transports (HTTP frameworks, queues) and
//! [`InventoryService`](super::InventoryService).

use serde::{Deserialize, Serialize};

use super::error::HandlerError;

/// An inbound command request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command name, maps to a registered handler.
    pub command: String,
    /// JSON input forwarded to the handler.
    #[serde(default)]
    pub input: serde_json::Value,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            command: command.into(),
            input,
        }
    }
}

/// The response returned after dispatching a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (handler output or error body).
    pub body: serde_json::Value,
}

impl CommandResponse {
    /// Build a success (200) response.
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    /// Build an error response from a `HandlerError`.
    pub fn from_error(err: &HandlerError) -> Self {
        Self {
            status: err.status_code(),
            body: err.to_body(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<Result<serde_json::Value, HandlerError>> for CommandResponse {
    fn from(result: Result<serde_json::Value, HandlerError>) -> Self {
        match result {
            Ok(body) => Self::ok(body),
            Err(err) => Self::from_error(&err),
        }
    }
}
