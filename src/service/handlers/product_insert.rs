//! Handler: product.insert

use serde::Deserialize;
use serde_json::{json, Value};

use crate::product::NewProduct;
use crate::router;
use crate::service::{Context, HandlerError};
use crate::store::ProductStore;

pub const COMMAND: &str = "product.insert";

#[derive(Deserialize)]
pub struct Input {
    pub address: String,
    pub product: NewProduct,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    super::has_address(ctx) && ctx.has_field("product")
}

pub fn handle<S: ProductStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let address = ctx.provider().insert(&input.address, input.product)?;
    let id = router::resolve(&address)?.id();
    Ok(json!({ "id": id, "address": address }))
}
