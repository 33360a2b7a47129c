//! HTTP transport - maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - `{ "ok": true, "commands": [...] }`
//! - `GET /products` - list; query parameters `name`, `supplier`, `in_stock`,
//!   `max_price`, `sort`, `order`
//! - `POST /products` - insert, body is a new product, answers `201`
//! - `GET /products/:id` - one product
//! - `PATCH /products/:id` - partial update, body is a patch
//! - `DELETE /products/:id` - delete
//! - `POST /products/:id/sell` - decrement stock, optional body `{ "amount": n }`
//! - `POST /:command` - dispatch any registered command, body is its input
//!
//! Errors answer with the status from [`HandlerError::status_code`] and a
//! `{ "error", "kind" }` body.
//!
//! Dispatch runs on tokio's blocking pool: store writes fsync the table file
//! and may wait on a row lock.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::product::contract;
use crate::store::{ProductFilter, ProductStore, SortDirection, SortKey, SortOrder};

use super::error::HandlerError;
use super::handlers;
use super::inventory_service::InventoryService;

type Shared<S> = Arc<InventoryService<S>>;

/// Build an axum `Router` that serves the given service.
pub fn router<S: ProductStore + 'static>(service: Arc<InventoryService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route(
            "/products",
            get(list_products::<S>).post(create_product::<S>),
        )
        .route(
            "/products/:id",
            get(get_product::<S>)
                .patch(update_product::<S>)
                .delete(delete_product::<S>),
        )
        .route("/products/:id/sell", post(sell_product::<S>))
        .route("/:command", post(command_handler::<S>))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: ProductStore + 'static>(
    service: Arc<InventoryService<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "inventory http listening");
    axum::serve(listener, app).await
}

/// Query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub name: Option<String>,
    pub supplier: Option<String>,
    pub in_stock: Option<bool>,
    pub max_price: Option<Decimal>,
    pub sort: Option<SortKey>,
    pub order: Option<SortDirection>,
}

impl ListParams {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            name_contains: self.name.clone(),
            supplier_name: self.supplier.clone(),
            in_stock: self.in_stock,
            max_price: self.max_price,
        }
    }

    fn sort(&self) -> Option<SortOrder> {
        match (self.sort, self.order) {
            (None, None) => None,
            (key, direction) => Some(SortOrder {
                key: key.unwrap_or_default(),
                direction: direction.unwrap_or_default(),
            }),
        }
    }
}

fn respond(status: StatusCode, result: Result<Value, HandlerError>) -> Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(e.to_body())).into_response()
        }
    }
}

fn item_address(id: &str) -> String {
    format!("{}/{}", contract::CONTENT_URI, id)
}

/// `GET /health` - returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
) -> impl IntoResponse {
    let mut commands: Vec<&str> = service.commands();
    commands.sort_unstable();
    Json(json!({ "ok": true, "commands": commands }))
}

async fn list_products<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    Query(params): Query<ListParams>,
) -> Response {
    let input = json!({
        "address": contract::CONTENT_URI,
        "filter": params.filter(),
        "sort": params.sort(),
    });
    respond(
        StatusCode::OK,
        run(service, handlers::product_list::COMMAND, input).await,
    )
}

async fn create_product<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    body: Bytes,
) -> Response {
    let result = match decode(&body) {
        Ok(product) => {
            let input = json!({ "address": contract::CONTENT_URI, "product": product });
            run(service, handlers::product_insert::COMMAND, input).await
        }
        Err(e) => Err(e),
    };
    respond(StatusCode::CREATED, result)
}

async fn get_product<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    Path(id): Path<String>,
) -> Response {
    let input = json!({ "address": item_address(&id) });
    respond(
        StatusCode::OK,
        run(service, handlers::product_get::COMMAND, input).await,
    )
}

async fn update_product<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let result = match decode(&body) {
        Ok(patch) => {
            let input = json!({ "address": item_address(&id), "patch": patch });
            run(service, handlers::product_update::COMMAND, input).await
        }
        Err(e) => Err(e),
    };
    respond(StatusCode::OK, result)
}

async fn delete_product<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    Path(id): Path<String>,
) -> Response {
    let input = json!({ "address": item_address(&id) });
    respond(
        StatusCode::OK,
        run(service, handlers::product_delete::COMMAND, input).await,
    )
}

async fn sell_product<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let input = if body.is_empty() {
        Ok(json!({}))
    } else {
        decode(&body)
    };
    let result = match input {
        Ok(mut input) if input.is_object() => {
            input["address"] = Value::String(item_address(&id));
            run(service, handlers::product_sell::COMMAND, input).await
        }
        Ok(_) => Err(HandlerError::DecodeFailed("sell body must be an object".into())),
        Err(e) => Err(e),
    };
    respond(StatusCode::OK, result)
}

/// `POST /:command` - dispatch a command with the JSON body as input.
async fn command_handler<S: ProductStore + 'static>(
    State(service): State<Shared<S>>,
    Path(command): Path<String>,
    body: Bytes,
) -> Response {
    let result = match decode(&body) {
        Ok(input) => run(service, command, input).await,
        Err(e) => Err(e),
    };
    respond(StatusCode::OK, result)
}

/// Dispatch on the blocking pool.
async fn run<S: ProductStore + 'static>(
    service: Shared<S>,
    command: impl Into<String>,
    input: Value,
) -> Result<Value, HandlerError> {
    let command = command.into();
    tokio::task::spawn_blocking(move || service.dispatch(&command, input))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "dispatch task failed");
            Err(HandlerError::Interrupted(e.to_string()))
        })
}

fn decode(body: &[u8]) -> Result<Value, HandlerError> {
    Ok(serde_json::from_slice(body)?)
}
