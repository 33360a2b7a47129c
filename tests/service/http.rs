//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use inventory_store::service::{self, InventoryService};
use inventory_store::{contract, FileProductStore, InMemoryProductStore, ProductStore};
use serde_json::{json, Value};

use crate::support::widget_input;

/// Bind to port 0 and return the base URL.
async fn start_server<S: ProductStore + 'static>(service: Arc<InventoryService<S>>) -> String {
    let app = service::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn in_memory_server() -> String {
    start_server(Arc::new(InventoryService::new(InMemoryProductStore::new()))).await
}

fn widget_body(quantity: i64) -> Value {
    widget_input(quantity)["product"].clone()
}

#[tokio::test]
async fn health_check() {
    let base = in_memory_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert!(commands.iter().any(|c| c == "product.sell"));
}

#[tokio::test]
async fn rest_crud_and_sell() {
    let base = in_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/products"))
        .json(&widget_body(2))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["id"], 1);

    let resp = client
        .patch(format!("{base}/products/1"))
        .json(&json!({ "price": "9.99" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let product: Value = client
        .get(format!("{base}/products/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["price"], "9.99");
    assert_eq!(product["quantity"], 2);

    let resp = client
        .post(format!("{base}/products/1/sell"))
        .json(&json!({ "amount": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let sale: Value = resp.json().await.unwrap();
    assert_eq!(sale, json!({ "id": 1, "quantity": 0, "soldOut": true }));

    // No body means one unit.
    let resp = client
        .post(format!("{base}/products/1/sell"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "insufficient_stock");

    let resp = client
        .delete(format!("{base}/products/1"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "rows": 1 }));

    let resp = client
        .get(format!("{base}/products/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn list_with_query_parameters() {
    let base = in_memory_server().await;
    let client = reqwest::Client::new();

    for quantity in [3, 0, 8] {
        client
            .post(format!("{base}/products"))
            .json(&widget_body(quantity))
            .send()
            .await
            .unwrap();
    }

    let body: Value = client
        .get(format!("{base}/products?in_stock=true&sort=quantity&order=desc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let quantities: Vec<i64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, vec![8, 3]);
}

#[tokio::test]
async fn error_statuses() {
    let base = in_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/products/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_identifier");

    let mut invalid = widget_body(1);
    invalid["price"] = json!("-1.00");
    let resp = client
        .post(format!("{base}/products"))
        .json(&invalid)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let resp = client
        .post(format!("{base}/products"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/product.restock"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn command_endpoint_dispatches() {
    let base = in_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/product.insert"))
        .json(&widget_input(4))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{base}/product.sell"))
        .json(&json!({ "address": contract::item_address(1), "amount": 3 }))
        .send()
        .await
        .unwrap();
    let sale: Value = resp.json().await.unwrap();
    assert_eq!(sale["quantity"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_sales_over_http() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = FileProductStore::open_in(dir.path()).unwrap();
    let base = start_server(Arc::new(InventoryService::new(store))).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/products"))
        .json(&widget_body(1))
        .send()
        .await
        .unwrap();

    let sell = |client: reqwest::Client, base: String| async move {
        client
            .post(format!("{base}/products/1/sell"))
            .send()
            .await
            .unwrap()
            .status()
            .as_u16()
    };
    let (a, b) = tokio::join!(
        sell(client.clone(), base.clone()),
        sell(client.clone(), base.clone())
    );
    let mut statuses = vec![a, b];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![200, 409]);

    let reopened = FileProductStore::open_in(dir.path()).unwrap();
    assert_eq!(reopened.get(1).unwrap().quantity, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn many_sellers_over_http_share_the_stock() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = FileProductStore::open_in(dir.path()).unwrap();
    let base = start_server(Arc::new(InventoryService::new(store))).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/products"))
        .json(&widget_body(5))
        .send()
        .await
        .unwrap();

    let mut sales = tokio::task::JoinSet::new();
    for _ in 0..12 {
        let client = client.clone();
        let url = format!("{base}/products/1/sell");
        sales.spawn(async move { client.post(url).send().await.unwrap().status().as_u16() });
    }

    let mut statuses = Vec::new();
    while let Some(status) = sales.join_next().await {
        statuses.push(status.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 5);
    assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 7);

    let reopened = FileProductStore::open_in(dir.path()).unwrap();
    assert_eq!(reopened.get(1).unwrap().quantity, 0);
}
