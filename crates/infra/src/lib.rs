//! Infrastructure layer: warehouse storage and the operations service.

pub mod operations;
pub mod seed;
pub mod store;

pub use operations::{InventoryOperations, OperationError};
pub use store::{
    InMemoryWarehouseStore, PostgresWarehouseStore, StockUpdate, StoreError, WarehouseStore,
};

#[cfg(test)]
mod integration_tests;
