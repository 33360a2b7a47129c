//! Change notification through the provider.

#![cfg(feature = "emitter")]

use std::sync::mpsc;
use std::time::Duration;

use inventory_store::{
    contract, ChangeKind, InMemoryProductStore, ProductPatch, ProductProvider,
};

use crate::support::widget;

#[test]
fn observers_see_every_mutation() {
    let provider = ProductProvider::new(InMemoryProductStore::new());
    let (tx, rx) = mpsc::channel();
    provider
        .notifier()
        .on_change(move |change| {
            let _ = tx.send(change);
        })
        .unwrap();

    let item = provider.insert(contract::CONTENT_URI, widget(1)).unwrap();
    provider
        .update(&item, &ProductPatch::new().name("Widget v2"))
        .unwrap();
    provider.sell(&item, 1).unwrap();
    provider.delete(&item).unwrap();

    // Delivery is asynchronous and unordered; collect and compare as a set.
    let mut kinds: Vec<ChangeKind> = (0..5)
        .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap().kind)
        .collect();
    kinds.sort_by_key(|kind| format!("{kind:?}"));
    assert_eq!(
        kinds,
        vec![
            ChangeKind::Deleted,
            ChangeKind::Inserted,
            ChangeKind::Sold,
            ChangeKind::SoldOut,
            ChangeKind::Updated,
        ]
    );
}

#[test]
fn rejected_operations_are_not_announced() {
    let provider = ProductProvider::new(InMemoryProductStore::new());
    let item = provider.insert(contract::CONTENT_URI, widget(0)).unwrap();

    let (tx, rx) = mpsc::channel();
    provider
        .notifier()
        .on_change(move |change| {
            let _ = tx.send(change);
        })
        .unwrap();

    assert!(provider.sell(&item, 1).is_err());
    assert_eq!(provider.delete(&contract::item_address(77)).unwrap(), 0);
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}
