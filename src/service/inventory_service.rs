//! InventoryService - command handler registry and dispatch.

use std::collections::HashMap;

use serde_json::Value;

use crate::provider::ProductProvider;
use crate::store::ProductStore;

use super::context::Context;
use super::error::HandlerError;
use super::handlers;
use super::request::{CommandRequest, CommandResponse};

type Guard<S> = Box<dyn Fn(&Context<S>) -> bool + Send + Sync>;
type Handle<S> = Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<S> {
    guard: Option<Guard<S>>,
    handle: Handle<S>,
}

/// Routes named commands to handler functions over a shared provider.
pub struct InventoryService<S> {
    provider: ProductProvider<S>,
    handlers: HashMap<String, CommandHandler<S>>,
}

impl<S: ProductStore + 'static> InventoryService<S> {
    /// A service over `store` with every product command registered.
    pub fn new(store: S) -> Self {
        crate::register_handlers!(
            Self::empty(ProductProvider::new(store)),
            handlers::product_list,
            handlers::product_get,
            handlers::product_insert,
            handlers::product_update,
            handlers::product_delete,
            handlers::product_sell,
        )
    }

    /// A service with no commands registered.
    pub fn empty(provider: ProductProvider<S>) -> Self {
        Self {
            provider,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler.
    ///
    /// Uses builder pattern, returns `self` for chaining.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// If the guard returns `false` the command is rejected with
    /// `HandlerError::GuardRejected` before the handler runs.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    pub fn dispatch(&self, command: &str, input: Value) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(command.to_string(), input, &self.provider);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&ctx);
        match &result {
            Ok(_) => tracing::debug!(command, "command handled"),
            Err(err) if err.status_code() >= 500 => {
                tracing::error!(command, error = %err, "command failed")
            }
            Err(err) => tracing::debug!(command, error = %err, "command rejected"),
        }
        result
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        self.dispatch(&request.command, request.input.clone()).into()
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    pub fn provider(&self) -> &ProductProvider<S> {
        &self.provider
    }
}
