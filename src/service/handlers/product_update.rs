//! Handler: product.update

use serde::Deserialize;
use serde_json::{json, Value};

use crate::product::ProductPatch;
use crate::service::{Context, HandlerError};
use crate::store::ProductStore;

pub const COMMAND: &str = "product.update";

#[derive(Deserialize)]
pub struct Input {
    pub address: String,
    pub patch: ProductPatch,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    super::has_address(ctx) && ctx.has_field("patch")
}

pub fn handle<S: ProductStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let rows = ctx.provider().update(&input.address, &input.patch)?;
    Ok(json!({ "rows": rows }))
}
