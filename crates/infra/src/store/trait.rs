use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockyard_inventory::{StockLevels, Warehouse};

/// Storage-layer failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record changed between the operation's read and its commit; nothing
    /// was applied. The caller may re-read and retry.
    #[error("concurrent update detected: {0}")]
    Conflict(String),

    /// Underlying persistence failure. Any partially-started mutation set has
    /// been rolled back in full before this surfaces.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// A compare-and-set mutation of one warehouse's stock counters.
///
/// `commit` verifies the record still holds `expected` before writing
/// `target`. The warehouse table carries no version column, so the stock
/// counters themselves are the optimistic-concurrency token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub name: String,
    pub expected: StockLevels,
    pub target: StockLevels,
}

impl StockUpdate {
    pub fn new(name: impl Into<String>, expected: StockLevels, target: StockLevels) -> Self {
        Self {
            name: name.into(),
            expected,
            target,
        }
    }
}

/// Durable, atomic storage and retrieval of warehouse records, keyed by name.
///
/// Contract: `commit` never partially applies a mutation set (either every
/// update persists or none does), and no concurrent caller observes a state
/// between the start and the end of a commit.
#[async_trait]
pub trait WarehouseStore: Send + Sync {
    /// Exact-match lookup by warehouse name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Warehouse>, StoreError>;

    /// All records with pending incoming stock (`incoming > 0`), in name
    /// order.
    async fn find_all_with_incoming(&self) -> Result<Vec<Warehouse>, StoreError>;

    /// Apply a mutation set as a single atomic unit.
    ///
    /// Each update's `expected` levels are re-checked against current state;
    /// any mismatch fails the whole set with [`StoreError::Conflict`] and
    /// leaves prior state unchanged.
    async fn commit(&self, updates: Vec<StockUpdate>) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> WarehouseStore for Arc<S>
where
    S: WarehouseStore + ?Sized,
{
    async fn find_by_name(&self, name: &str) -> Result<Option<Warehouse>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn find_all_with_incoming(&self) -> Result<Vec<Warehouse>, StoreError> {
        (**self).find_all_with_incoming().await
    }

    async fn commit(&self, updates: Vec<StockUpdate>) -> Result<(), StoreError> {
        (**self).commit(updates).await
    }
}
