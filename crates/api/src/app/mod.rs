//! Application assembly: store selection, operations wiring, routing.

pub mod dto;
pub mod errors;
pub mod routes;

use std::sync::Arc;

use axum::{extract::Extension, Router};

use stockyard_infra::{
    seed, InMemoryWarehouseStore, InventoryOperations, PostgresWarehouseStore, WarehouseStore,
};

/// The operations service as shared with request handlers.
pub type Operations = InventoryOperations<Arc<dyn WarehouseStore>>;

/// Build the application with its store chosen from the environment.
///
/// `DATABASE_URL` set → Postgres-backed store (schema ensured, fleet seeded
/// when the table is empty); unset → in-memory store pre-seeded with the
/// initial fleet.
pub async fn build_app() -> anyhow::Result<Router> {
    let store: Arc<dyn WarehouseStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sqlx::PgPool::connect(&database_url).await?;
            let store = PostgresWarehouseStore::new(pool);
            store.ensure_schema().await?;
            let seeded = store.seed_if_empty(&seed::initial_warehouses()).await?;
            if seeded > 0 {
                tracing::info!(seeded, "populated initial warehouse data");
            }
            Arc::new(store)
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set, using in-memory warehouse store");
            Arc::new(InMemoryWarehouseStore::with_warehouses(
                seed::initial_warehouses(),
            ))
        }
    };

    Ok(router(Arc::new(InventoryOperations::new(store))))
}

/// Assemble the router around an operations service.
///
/// Split from [`build_app`] so tests can inject their own store.
pub fn router(operations: Arc<Operations>) -> Router {
    Router::new()
        .merge(routes::system::router())
        .merge(routes::stock::router())
        .layer(Extension(operations))
}
