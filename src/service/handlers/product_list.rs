//! Handler: product.list

use serde::Deserialize;
use serde_json::{json, Value};

use crate::service::{Context, HandlerError};
use crate::store::{ProductFilter, ProductStore, SortOrder};

pub const COMMAND: &str = "product.list";

#[derive(Deserialize)]
pub struct Input {
    pub address: String,
    #[serde(default)]
    pub filter: ProductFilter,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    super::has_address(ctx)
}

pub fn handle<S: ProductStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let products = ctx
        .provider()
        .query(&input.address, &input.filter, input.sort)?;
    Ok(json!({ "products": products }))
}
