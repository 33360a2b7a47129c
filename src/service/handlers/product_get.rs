//! Handler: product.get

use serde_json::Value;

use crate::service::{Context, HandlerError};
use crate::store::ProductStore;

use super::AddressInput;

pub const COMMAND: &str = "product.get";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    super::has_address(ctx)
}

pub fn handle<S: ProductStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<AddressInput>()?;
    let product = ctx.provider().get(&input.address)?;
    Ok(serde_json::to_value(product)?)
}
