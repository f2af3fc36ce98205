//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (malformed input,
/// rejected transfers, unknown warehouses). Infrastructure concerns belong
/// elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or missing input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced warehouse does not exist. Carries the requested name.
    #[error("warehouse '{name}' not found")]
    WarehouseNotFound { name: String },

    /// A transfer was rejected by a business rule (e.g. self-transfer).
    #[error("transfer rejected: {0}")]
    TransferRejected(String),

    /// A transfer asked for more stock than the origin has available.
    #[error(
        "insufficient quantity available in '{warehouse}': available {available}, requested {requested}"
    )]
    InsufficientQuantity {
        warehouse: String,
        available: i64,
        requested: i64,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::WarehouseNotFound { name: name.into() }
    }

    pub fn transfer_rejected(msg: impl Into<String>) -> Self {
        Self::TransferRejected(msg.into())
    }
}
