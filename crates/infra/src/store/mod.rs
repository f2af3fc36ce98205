mod in_memory;
mod postgres;
mod r#trait;

pub use in_memory::InMemoryWarehouseStore;
pub use postgres::PostgresWarehouseStore;
pub use r#trait::{StockUpdate, StoreError, WarehouseStore};
