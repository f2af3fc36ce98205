//! Integration tests for the operations service against the in-memory store.
//!
//! Verifies:
//! - Operation flows over the seeded fleet (lookup, transfer, settlement)
//! - Atomicity and conservation under concurrent transfers
//! - Conflict handling never violates non-negativity

use std::sync::Arc;

use stockyard_inventory::{StockLevels, Transfer};

use crate::operations::{InventoryOperations, OperationError};
use crate::seed::initial_warehouses;
use crate::store::{InMemoryWarehouseStore, WarehouseStore};

fn seeded_operations() -> InventoryOperations<Arc<InMemoryWarehouseStore>> {
    let store = Arc::new(InMemoryWarehouseStore::with_warehouses(initial_warehouses()));
    InventoryOperations::new(store)
}

async fn fleet_total(store: &Arc<InMemoryWarehouseStore>) -> i64 {
    let mut total = 0;
    for name in ["New York", "Boston", "Texas"] {
        total += store
            .find_by_name(name)
            .await
            .unwrap()
            .expect("seeded warehouse missing")
            .forecast();
    }
    total
}

#[tokio::test]
async fn lookup_returns_seeded_levels() {
    let ops = seeded_operations();

    let boston = ops.quantity("Boston").await.unwrap();
    assert_eq!(boston.levels(), StockLevels::new(3, 0));
    assert_eq!(boston.forecast(), 3);
}

#[tokio::test]
async fn lookup_is_idempotent() {
    let ops = seeded_operations();

    let first = ops.quantity("Texas").await.unwrap();
    let second = ops.quantity("Texas").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn lookup_of_unknown_warehouse_carries_the_name() {
    let ops = seeded_operations();

    let err = ops.quantity("Chicago").await.unwrap_err();
    assert_eq!(
        err,
        OperationError::NotFound {
            name: "Chicago".to_string()
        }
    );
}

#[tokio::test]
async fn transfer_parks_stock_in_destination_incoming() {
    let ops = seeded_operations();

    let transfer = Transfer::new("New York", "Boston", 10).unwrap();
    let echoed = ops.transfer(transfer.clone()).await.unwrap();
    assert_eq!(echoed, transfer);

    let ny = ops.quantity("New York").await.unwrap();
    let boston = ops.quantity("Boston").await.unwrap();
    assert_eq!(ny.levels(), StockLevels::new(40, 0));
    assert_eq!(boston.levels(), StockLevels::new(3, 10));
}

#[tokio::test]
async fn transfer_conserves_the_fleet_total() {
    let store = Arc::new(InMemoryWarehouseStore::with_warehouses(initial_warehouses()));
    let ops = InventoryOperations::new(store.clone());

    let total_before = fleet_total(&store).await;
    ops.transfer(Transfer::new("New York", "Texas", 25).unwrap())
        .await
        .unwrap();
    assert_eq!(fleet_total(&store).await, total_before);
}

#[tokio::test]
async fn insufficient_transfer_leaves_balances_unchanged() {
    let ops = seeded_operations();

    let err = ops
        .transfer(Transfer::new("Boston", "New York", 10).unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OperationError::InsufficientQuantity {
            warehouse: "Boston".to_string(),
            available: 3,
            requested: 10,
        }
    );

    let boston = ops.quantity("Boston").await.unwrap();
    let ny = ops.quantity("New York").await.unwrap();
    assert_eq!(boston.levels(), StockLevels::new(3, 0));
    assert_eq!(ny.levels(), StockLevels::new(50, 0));
}

#[tokio::test]
async fn transfer_reports_missing_origin_before_missing_destination() {
    let ops = seeded_operations();

    let err = ops
        .transfer(Transfer::new("Nowhere", "Elsewhere", 1).unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OperationError::NotFound {
            name: "Nowhere".to_string()
        }
    );
}

#[tokio::test]
async fn transfer_to_missing_destination_is_not_found() {
    let ops = seeded_operations();

    let err = ops
        .transfer(Transfer::new("New York", "Chicago", 1).unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OperationError::NotFound {
            name: "Chicago".to_string()
        }
    );
}

#[tokio::test]
async fn settlement_settles_every_pending_warehouse() {
    let ops = seeded_operations();

    // Seed fleet has one pending warehouse (Texas 5/20); add a second.
    ops.transfer(Transfer::new("New York", "Boston", 10).unwrap())
        .await
        .unwrap();

    let settled = ops.settle_deliveries().await.unwrap();
    assert_eq!(settled, 2);

    let texas = ops.quantity("Texas").await.unwrap();
    let boston = ops.quantity("Boston").await.unwrap();
    assert_eq!(texas.levels(), StockLevels::new(25, 0));
    assert_eq!(boston.levels(), StockLevels::new(13, 0));
}

#[tokio::test]
async fn settlement_with_nothing_pending_reports_zero() {
    let ops = seeded_operations();

    assert_eq!(ops.settle_deliveries().await.unwrap(), 1);
    // Second pass finds nothing pending and still succeeds.
    assert_eq!(ops.settle_deliveries().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transfers_preserve_invariants() {
    let store = Arc::new(InMemoryWarehouseStore::with_warehouses(initial_warehouses()));
    let ops = Arc::new(InventoryOperations::new(store.clone()));
    let total_before = fleet_total(&store).await;

    // 20 racing transfers of 5 each against 50 available: at most 10 can win.
    let mut handles = Vec::new();
    for _ in 0..20 {
        let ops = ops.clone();
        handles.push(tokio::spawn(async move {
            ops.transfer(Transfer::new("New York", "Boston", 5).unwrap())
                .await
        }));
    }

    let mut accepted = 0i64;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(OperationError::InsufficientQuantity { .. })
            | Err(OperationError::ConflictExhausted { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let ny = ops.quantity("New York").await.unwrap();
    let boston = ops.quantity("Boston").await.unwrap();

    assert!(accepted >= 1, "no transfer got through");
    assert!(accepted <= 10, "more transfers accepted than stock allowed");
    assert!(ny.available >= 0);
    assert_eq!(ny.available, 50 - accepted * 5);
    assert_eq!(boston.incoming, accepted * 5);
    assert_eq!(fleet_total(&store).await, total_before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn settlement_racing_a_transfer_stays_consistent() {
    let store = Arc::new(InMemoryWarehouseStore::with_warehouses(initial_warehouses()));
    let ops = Arc::new(InventoryOperations::new(store.clone()));
    let total_before = fleet_total(&store).await;

    let transfer_ops = ops.clone();
    let transfer = tokio::spawn(async move {
        transfer_ops
            .transfer(Transfer::new("New York", "Texas", 5).unwrap())
            .await
    });
    let settle_ops = ops.clone();
    let settle = tokio::spawn(async move { settle_ops.settle_deliveries().await });

    transfer.await.unwrap().unwrap();
    let settled = settle.await.unwrap().unwrap();
    assert!(settled >= 1);

    let texas = ops.quantity("Texas").await.unwrap();
    // Depending on interleaving the transferred 5 may or may not have been
    // settled, but nothing is lost and nothing goes negative.
    assert!(texas.available >= 25);
    assert!(texas.incoming >= 0);
    assert_eq!(fleet_total(&store).await, total_before);
}
