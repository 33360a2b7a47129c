//! Handler: product.sell

use serde::Deserialize;
use serde_json::Value;

use crate::service::{Context, HandlerError};
use crate::store::ProductStore;

pub const COMMAND: &str = "product.sell";

#[derive(Deserialize)]
pub struct Input {
    pub address: String,
    #[serde(default = "one")]
    pub amount: i64,
}

fn one() -> i64 {
    1
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    super::has_address(ctx)
}

pub fn handle<S: ProductStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let outcome = ctx.provider().sell(&input.address, input.amount)?;
    Ok(serde_json::to_value(outcome)?)
}
