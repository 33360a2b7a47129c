//! In-process dispatch of the product commands.

use inventory_store::contract;
use inventory_store::service::{CommandRequest, HandlerError};
use inventory_store::InventoryError;
use serde_json::json;

use crate::support::{service, widget_input};

#[test]
fn registers_all_product_commands() {
    let service = service();
    let mut commands = service.commands();
    commands.sort();
    assert_eq!(
        commands,
        vec![
            "product.delete",
            "product.get",
            "product.insert",
            "product.list",
            "product.sell",
            "product.update",
        ]
    );
}

#[test]
fn insert_then_get() {
    let service = service();
    let created = service.dispatch("product.insert", widget_input(3)).unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["address"], contract::item_address(1));

    let product = service
        .dispatch("product.get", json!({ "address": created["address"] }))
        .unwrap();
    assert_eq!(product["name"], "Widget");
    assert_eq!(product["quantity"], 3);
    assert_eq!(product["supplierContact"], "555-0100");
}

#[test]
fn sell_scenario() {
    let service = service();
    service.dispatch("product.insert", widget_input(3)).unwrap();
    let address = contract::item_address(1);

    for remaining in [2, 1, 0] {
        let outcome = service
            .dispatch("product.sell", json!({ "address": address }))
            .unwrap();
        assert_eq!(outcome["quantity"], remaining);
        assert_eq!(outcome["soldOut"], remaining == 0);
    }

    let err = service
        .dispatch("product.sell", json!({ "address": address }))
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(err.kind(), "insufficient_stock");
}

#[test]
fn update_and_list() {
    let service = service();
    service.dispatch("product.insert", widget_input(3)).unwrap();
    service.dispatch("product.insert", widget_input(0)).unwrap();

    let updated = service
        .dispatch(
            "product.update",
            json!({ "address": contract::item_address(1), "patch": { "price": "9.99" } }),
        )
        .unwrap();
    assert_eq!(updated, json!({ "rows": 1 }));

    let listed = service
        .dispatch(
            "product.list",
            json!({
                "address": contract::CONTENT_URI,
                "filter": { "in_stock": true },
            }),
        )
        .unwrap();
    let products = listed["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["price"], "9.99");
}

#[test]
fn delete_reports_rows() {
    let service = service();
    service.dispatch("product.insert", widget_input(3)).unwrap();
    let input = json!({ "address": contract::item_address(1) });

    assert_eq!(
        service.dispatch("product.delete", input.clone()).unwrap(),
        json!({ "rows": 1 })
    );
    assert_eq!(
        service.dispatch("product.delete", input).unwrap(),
        json!({ "rows": 0 })
    );
}

#[test]
fn errors_are_typed() {
    let service = service();

    let err = service
        .dispatch("product.get", json!({ "address": contract::item_address(5) }))
        .unwrap_err();
    assert!(matches!(
        err,
        HandlerError::Inventory(InventoryError::NotFound(5))
    ));

    let mut input = widget_input(3);
    input["product"]["name"] = json!("");
    let err = service.dispatch("product.insert", input).unwrap_err();
    assert_eq!(err.status_code(), 422);

    let err = service
        .dispatch("product.get", json!({ "address": "content://nowhere/products/1" }))
        .unwrap_err();
    assert_eq!(err.kind(), "malformed_address");

    let err = service
        .dispatch(
            "product.get",
            json!({ "address": format!("{}/x1", contract::CONTENT_URI) }),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_identifier");

    let err = service
        .dispatch("product.delete", json!({ "address": contract::CONTENT_URI }))
        .unwrap_err();
    assert_eq!(err.status_code(), 405);
}

#[test]
fn guard_and_unknown_command() {
    let service = service();

    let err = service.dispatch("product.get", json!({})).unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));

    let err = service.dispatch("product.restock", json!({})).unwrap_err();
    assert!(matches!(err, HandlerError::UnknownCommand(_)));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn dispatch_request_wraps_result() {
    let service = service();
    let response = service.dispatch_request(&CommandRequest::new("product.insert", widget_input(1)));
    assert!(response.is_success());
    assert_eq!(response.body["id"], 1);

    let response = service.dispatch_request(&CommandRequest::new(
        "product.get",
        json!({ "address": contract::item_address(9) }),
    ));
    assert_eq!(response.status, 404);
    assert_eq!(response.body["kind"], "not_found");
}
