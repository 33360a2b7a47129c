//! Handler: product.delete

use serde_json::{json, Value};

use crate::service::{Context, HandlerError};
use crate::store::ProductStore;

use super::AddressInput;

pub const COMMAND: &str = "product.delete";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    super::has_address(ctx)
}

pub fn handle<S: ProductStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<AddressInput>()?;
    let rows = ctx.provider().delete(&input.address)?;
    Ok(json!({ "rows": rows }))
}
