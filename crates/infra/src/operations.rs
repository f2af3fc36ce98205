//! Inventory operations (application-level orchestration).
//!
//! Each operation is one read-validate-commit cycle against the injected
//! store:
//!
//! ```text
//! Request
//!   ↓
//! 1. Read the involved warehouse records
//!   ↓
//! 2. Validate business rules (pure domain logic, produces target levels)
//!   ↓
//! 3. Commit all mutations as one atomic compare-and-set batch
//! ```
//!
//! A commit fails with [`StoreError::Conflict`] when another operation
//! touched one of the records between step 1 and step 3; the cycle is then
//! re-run from the read, so validation always happens against current
//! committed state and the non-negativity invariant cannot be broken by
//! interleaving. Conflicts are bounded; exhaustion surfaces as a storage
//! failure rather than a torn write.
//!
//! This module contains no IO itself; it composes the store trait.

use thiserror::Error;
use tracing::instrument;

use stockyard_core::DomainError;
use stockyard_inventory::{Transfer, Warehouse};

use crate::store::{StockUpdate, StoreError, WarehouseStore};

/// How many read-validate-commit cycles an operation runs before giving up
/// on a contended record set.
const MAX_COMMIT_ATTEMPTS: u32 = 5;

/// Operation-boundary error.
///
/// Every failure of an operation is recovered into one of these kinds;
/// nothing propagates past the operations service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Malformed or missing caller input. Never mutates state.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced warehouse does not exist. Carries the requested name.
    #[error("warehouse '{name}' not found")]
    NotFound { name: String },

    /// Business-rule rejection (e.g. self-transfer).
    #[error("transfer rejected: {0}")]
    TransferRejected(String),

    /// The origin cannot cover the requested quantity.
    #[error(
        "insufficient quantity available in '{warehouse}': available {available}, requested {requested}"
    )]
    InsufficientQuantity {
        warehouse: String,
        available: i64,
        requested: i64,
    },

    /// Every commit attempt hit a concurrent update.
    #[error("operation abandoned after {attempts} conflicting commit attempts")]
    ConflictExhausted { attempts: u32 },

    /// Underlying persistence failure (already rolled back).
    #[error(transparent)]
    Store(StoreError),
}

impl From<DomainError> for OperationError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => OperationError::Validation(msg),
            DomainError::WarehouseNotFound { name } => OperationError::NotFound { name },
            DomainError::TransferRejected(msg) => OperationError::TransferRejected(msg),
            DomainError::InsufficientQuantity {
                warehouse,
                available,
                requested,
            } => OperationError::InsufficientQuantity {
                warehouse,
                available,
                requested,
            },
        }
    }
}

impl From<StoreError> for OperationError {
    fn from(value: StoreError) -> Self {
        OperationError::Store(value)
    }
}

/// Inventory operations service.
///
/// Owns the injected store handle (constructed once at the composition root;
/// no globals) and implements the three business operations on top of it.
///
/// Generic over the store so tests run against [`InMemoryWarehouseStore`]
/// and production against [`PostgresWarehouseStore`] without touching the
/// operation logic.
///
/// [`InMemoryWarehouseStore`]: crate::store::InMemoryWarehouseStore
/// [`PostgresWarehouseStore`]: crate::store::PostgresWarehouseStore
#[derive(Debug)]
pub struct InventoryOperations<S> {
    store: S,
}

impl<S> InventoryOperations<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> InventoryOperations<S>
where
    S: WarehouseStore,
{
    /// Quantity Lookup: return the named warehouse's stock record.
    ///
    /// No side effects; repeated calls with no intervening mutation return
    /// identical records.
    #[instrument(skip(self), err)]
    pub async fn quantity(&self, name: &str) -> Result<Warehouse, OperationError> {
        match self.store.find_by_name(name).await? {
            Some(warehouse) => Ok(warehouse),
            None => Err(OperationError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Transfer: move stock from the origin's available pool into the
    /// destination's incoming pool, atomically.
    ///
    /// Existence is checked origin first, then destination; the sufficiency
    /// check runs against the origin record read in the same cycle as the
    /// commit. Echoes the transfer on success.
    #[instrument(
        skip(self, transfer),
        fields(
            origin = transfer.origin(),
            destination = transfer.destination(),
            quantity = transfer.quantity()
        ),
        err
    )]
    pub async fn transfer(&self, transfer: Transfer) -> Result<Transfer, OperationError> {
        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let origin = self
                .store
                .find_by_name(transfer.origin())
                .await?
                .ok_or_else(|| OperationError::NotFound {
                    name: transfer.origin().to_string(),
                })?;
            let destination = self
                .store
                .find_by_name(transfer.destination())
                .await?
                .ok_or_else(|| OperationError::NotFound {
                    name: transfer.destination().to_string(),
                })?;

            let (origin_after, destination_after) = transfer.apply(&origin, &destination)?;

            let updates = vec![
                StockUpdate::new(origin.name.clone(), origin.levels(), origin_after),
                StockUpdate::new(
                    destination.name.clone(),
                    destination.levels(),
                    destination_after,
                ),
            ];

            match self.store.commit(updates).await {
                Ok(()) => return Ok(transfer),
                Err(StoreError::Conflict(reason)) => {
                    tracing::warn!(%reason, "transfer commit conflicted, re-reading");
                    continue;
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(OperationError::ConflictExhausted {
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }

    /// Delivery Settlement: for every warehouse with pending incoming stock,
    /// convert incoming into available.
    ///
    /// The whole fleet settles in one commit (all-or-nothing, never a torn
    /// partial settlement). An empty pending set is a successful zero-count
    /// settlement, not an error. Returns the number of warehouses settled.
    #[instrument(skip(self), err)]
    pub async fn settle_deliveries(&self) -> Result<usize, OperationError> {
        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let pending = self.store.find_all_with_incoming().await?;
            if pending.is_empty() {
                return Ok(0);
            }

            let updates: Vec<StockUpdate> = pending
                .iter()
                .map(|w| StockUpdate::new(w.name.clone(), w.levels(), w.levels().settle()))
                .collect();
            let count = updates.len();

            match self.store.commit(updates).await {
                Ok(()) => return Ok(count),
                Err(StoreError::Conflict(reason)) => {
                    tracing::warn!(%reason, "settlement commit conflicted, re-reading");
                    continue;
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(OperationError::ConflictExhausted {
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }
}
