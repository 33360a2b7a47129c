//! Context passed to command handlers.
//!
//! Carries the parsed input and a reference to the provider. Handlers
//! access everything they need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::provider::ProductProvider;

use super::error::HandlerError;

/// The context passed to every command handler.
pub struct Context<'a, S> {
    /// The command name being handled.
    command_name: String,
    /// Raw JSON input from the request.
    input: Value,
    provider: &'a ProductProvider<S>,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(command_name: String, input: Value, provider: &'a ProductProvider<S>) -> Self {
        Self {
            command_name,
            input,
            provider,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON input.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// Get the command name.
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn provider(&self) -> &ProductProvider<S> {
        self.provider
    }

    /// Check if the raw input contains a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    /// Check if the raw input contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
