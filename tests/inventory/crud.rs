//! CRUD properties of the product stores.

use inventory_store::{
    Decimal, InMemoryProductStore, InventoryError, ProductFilter, ProductPatch, ProductStore, SortKey,
    SortOrder,
};

use crate::support::{cents, gadget, widget};

#[test]
fn get_returns_exactly_what_was_inserted() {
    let store = InMemoryProductStore::new();
    let id = store.insert(gadget(12)).unwrap();

    let product = store.get(id).unwrap();
    assert_eq!(product.id, id);
    assert_eq!(product.name, "Gadget");
    assert_eq!(product.price, cents(1250));
    assert_eq!(product.quantity, 12);
    assert_eq!(product.supplier_name, "Globex");
    assert_eq!(product.supplier_contact, "globex@example.com");
}

#[test]
fn absent_ids() {
    let store = InMemoryProductStore::new();
    store.insert(widget(1)).unwrap();

    assert_eq!(store.get(42).unwrap_err(), InventoryError::NotFound(42));
    assert_eq!(store.delete(42).unwrap(), 0);
    assert_eq!(
        store
            .update(42, &ProductPatch::new().quantity(5))
            .unwrap_err(),
        InventoryError::NotFound(42)
    );
    assert_eq!(
        store
            .update_rows(42, &ProductPatch::new().quantity(5))
            .unwrap(),
        0
    );
}

#[test]
fn price_update_round_trips() {
    let store = InMemoryProductStore::new();
    let id = store.insert(widget(3)).unwrap();
    let before = store.get(id).unwrap();

    assert_eq!(
        store
            .update(id, &ProductPatch::new().price(cents(999)))
            .unwrap(),
        1
    );

    let after = store.get(id).unwrap();
    assert_eq!(after.price, "9.99".parse::<Decimal>().unwrap());
    assert_eq!(after.name, before.name);
    assert_eq!(after.quantity, before.quantity);
    assert_eq!(after.supplier_name, before.supplier_name);
    assert_eq!(after.supplier_contact, before.supplier_contact);
}

#[test]
fn update_revalidates_quantity() {
    let store = InMemoryProductStore::new();
    let id = store.insert(widget(3)).unwrap();

    let err = store
        .update(id, &ProductPatch::new().quantity(-2))
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation { field: "quantity", .. }));
    assert_eq!(store.get(id).unwrap().quantity, 3);
}

#[test]
fn delete_is_idempotent() {
    let store = InMemoryProductStore::new();
    let id = store.insert(widget(3)).unwrap();

    assert_eq!(store.delete(id).unwrap(), 1);
    assert_eq!(store.delete(id).unwrap(), 0);
    assert!(matches!(store.get(id), Err(InventoryError::NotFound(_))));
}

#[test]
fn list_defaults_to_insertion_order() {
    let store = InMemoryProductStore::new();
    let first = store.insert(widget(3)).unwrap();
    let second = store.insert(gadget(0)).unwrap();
    let third = store.insert(widget(8)).unwrap();

    let ids: Vec<u64> = store.list_all().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn list_with_filter_and_sort() {
    let store = InMemoryProductStore::new();
    store.insert(widget(3)).unwrap();
    store.insert(gadget(0)).unwrap();
    store.insert(widget(8)).unwrap();

    let in_stock = store
        .list(
            &ProductFilter::new().in_stock(true),
            Some(SortOrder::desc(SortKey::Quantity)),
        )
        .unwrap();
    let quantities: Vec<i64> = in_stock.iter().map(|p| p.quantity).collect();
    assert_eq!(quantities, vec![8, 3]);

    let cheap = store
        .list(&ProductFilter::new().max_price(cents(500)), None)
        .unwrap();
    assert!(cheap.iter().all(|p| p.name == "Widget"));
    assert_eq!(cheap.len(), 2);
}
