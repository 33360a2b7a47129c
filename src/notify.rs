//! Change notification for observers of the products table.
//!
//! After every successful mutation the provider announces a [`Change`] for
//! the affected address. With the `emitter` feature, observers subscribe via
//! [`ChangeNotifier::on_change`] and are called asynchronously on the
//! emitter's own threads. Without it, changes are only logged.

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};

#[cfg(feature = "emitter")]
use crate::error::InventoryError;
use crate::product::contract;

/// Event name every change is emitted under.
pub const CHANGE_EVENT: &str = "products.changed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
    Sold,
    /// A sale took the last unit.
    SoldOut,
}

/// A single change to one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub id: u64,
    pub address: String,
}

impl Change {
    pub fn new(kind: ChangeKind, id: u64) -> Self {
        Self {
            kind,
            id,
            address: contract::item_address(id),
        }
    }
}

/// Fan-out point for [`Change`]s.
pub struct ChangeNotifier {
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register an observer. Returns the listener id.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F) -> Result<String, InventoryError>
    where
        F: Fn(Change) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| InventoryError::poisoned("on_change"))?;
        Ok(emitter.on(CHANGE_EVENT, move |payload: String| {
            match serde_json::from_str::<Change>(&payload) {
                Ok(change) => listener(change),
                Err(err) => tracing::warn!(error = %err, "dropping undecodable change"),
            }
        }))
    }

    /// Announce a change. Never fails; delivery problems are logged.
    pub fn notify(&self, change: Change) {
        tracing::debug!(kind = ?change.kind, id = change.id, "product changed");

        #[cfg(feature = "emitter")]
        {
            let payload = match serde_json::to_string(&change) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to encode change");
                    return;
                }
            };
            match self.emitter.lock() {
                Ok(mut emitter) => {
                    emitter.emit(CHANGE_EVENT, payload);
                }
                Err(_) => tracing::warn!("change emitter poisoned, dropping change"),
            }
        }
    }
}
