//! Built-in product command handlers, one file per command.

pub mod product_delete;
pub mod product_get;
pub mod product_insert;
pub mod product_list;
pub mod product_sell;
pub mod product_update;

use serde::Deserialize;

use super::Context;

/// Input carrying only an address.
#[derive(Deserialize)]
pub struct AddressInput {
    pub address: String,
}

/// Guard shared by every product command.
pub(crate) fn has_address<S>(ctx: &Context<S>) -> bool {
    ctx.raw_input()
        .get("address")
        .is_some_and(|address| address.is_string())
}
