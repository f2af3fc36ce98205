//! Postgres-backed warehouse store.
//!
//! One table, one row per warehouse (`name` is the primary key). Every commit
//! runs as a single transaction: rows are locked with `SELECT ... FOR UPDATE`
//! in sorted name order, expectations are verified against the locked rows,
//! and only then are the updates written. Any mismatch or backend failure
//! rolls the whole transaction back.
//!
//! ## Error mapping
//!
//! | SQLx error | PostgreSQL code | StoreError |
//! |------------|-----------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (check constraint) | `23514` | `Backend` |
//! | Database (other) | any other | `Backend` |
//! | Pool / connection / decode | n/a | `Backend` |

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use stockyard_inventory::{StockLevels, Warehouse};

use super::r#trait::{StockUpdate, StoreError, WarehouseStore};

/// Postgres-backed warehouse store.
///
/// Thread-safe: the SQLx pool handles connection management, and all
/// multi-row mutations go through one transaction with row-level locks.
#[derive(Debug, Clone)]
pub struct PostgresWarehouseStore {
    pool: Arc<PgPool>,
}

impl PostgresWarehouseStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the warehouse table when it does not exist yet.
    ///
    /// The CHECK constraints back the non-negativity invariant at the
    /// storage level.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS warehouses (
                id TEXT NOT NULL UNIQUE,
                name TEXT PRIMARY KEY,
                available BIGINT NOT NULL DEFAULT 0 CHECK (available >= 0),
                incoming BIGINT NOT NULL DEFAULT 0 CHECK (incoming >= 0)
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        Ok(())
    }

    /// Insert the given fleet when the table is empty.
    ///
    /// Safe to run on every startup; an already-populated table is left
    /// untouched. Returns how many records were inserted.
    #[instrument(skip(self, warehouses), fields(fleet_size = warehouses.len()), err)]
    pub async fn seed_if_empty(&self, warehouses: &[Warehouse]) -> Result<usize, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let row = sqlx::query("SELECT COUNT(*) AS total FROM warehouses")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("count_warehouses", e))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| StoreError::Backend(format!("failed to read count: {e}")))?;

        if total > 0 {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Ok(0);
        }

        for warehouse in warehouses {
            sqlx::query(
                r#"
                INSERT INTO warehouses (id, name, available, incoming)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(warehouse.id.as_str())
            .bind(&warehouse.name)
            .bind(warehouse.available)
            .bind(warehouse.incoming)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert_warehouse", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(warehouses.len())
    }
}

#[async_trait]
impl WarehouseStore for PostgresWarehouseStore {
    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Warehouse>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, available, incoming
            FROM warehouses
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_name", e))?;

        row.map(|r| warehouse_from_row(&r)).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_all_with_incoming(&self) -> Result<Vec<Warehouse>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, available, incoming
            FROM warehouses
            WHERE incoming > 0
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all_with_incoming", e))?;

        rows.iter().map(warehouse_from_row).collect()
    }

    #[instrument(skip(self, updates), fields(update_count = updates.len()), err)]
    async fn commit(&self, mut updates: Vec<StockUpdate>) -> Result<(), StoreError> {
        if updates.is_empty() {
            return Ok(());
        }

        // Stable lock order: concurrent commits touching the same rows take
        // their FOR UPDATE locks in the same sequence and cannot deadlock.
        updates.sort_by(|a, b| a.name.cmp(&b.name));

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        for update in &updates {
            let row = sqlx::query(
                r#"
                SELECT available, incoming
                FROM warehouses
                WHERE name = $1
                FOR UPDATE
                "#,
            )
            .bind(&update.name)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("lock_warehouse", e))?;

            let Some(row) = row else {
                tx.rollback()
                    .await
                    .map_err(|e| map_sqlx_error("rollback", e))?;
                return Err(StoreError::Conflict(format!(
                    "warehouse '{}' no longer exists",
                    update.name
                )));
            };

            let available: i64 = row
                .try_get("available")
                .map_err(|e| StoreError::Backend(format!("failed to read available: {e}")))?;
            let incoming: i64 = row
                .try_get("incoming")
                .map_err(|e| StoreError::Backend(format!("failed to read incoming: {e}")))?;

            if StockLevels::new(available, incoming) != update.expected {
                tx.rollback()
                    .await
                    .map_err(|e| map_sqlx_error("rollback", e))?;
                return Err(StoreError::Conflict(format!(
                    "warehouse '{}' changed since it was read",
                    update.name
                )));
            }
        }

        for update in &updates {
            sqlx::query(
                r#"
                UPDATE warehouses
                SET available = $1, incoming = $2
                WHERE name = $3
                "#,
            )
            .bind(update.target.available)
            .bind(update.target.incoming)
            .bind(&update.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_warehouse", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(())
    }
}

fn warehouse_from_row(row: &sqlx::postgres::PgRow) -> Result<Warehouse, StoreError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| StoreError::Backend(format!("failed to read id: {e}")))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::Backend(format!("failed to read name: {e}")))?;
    let available: i64 = row
        .try_get("available")
        .map_err(|e| StoreError::Backend(format!("failed to read available: {e}")))?;
    let incoming: i64 = row
        .try_get("incoming")
        .map_err(|e| StoreError::Backend(format!("failed to read incoming: {e}")))?;

    Ok(Warehouse::new(id, name, available, incoming))
}

/// Map SQLx errors to [`StoreError`].
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {operation}: {}", db_err.message());

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // Unique violation: a concurrent writer got there first.
                    "23505" => StoreError::Conflict(msg),
                    // Check constraint violation (non-negativity).
                    "23514" => StoreError::Backend(msg),
                    _ => StoreError::Backend(msg),
                }
            } else {
                StoreError::Backend(msg)
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {operation}"))
        }
        _ => StoreError::Backend(format!("sqlx error in {operation}: {err}")),
    }
}
