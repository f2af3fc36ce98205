use stockyard_core::{DomainError, DomainResult};

use crate::warehouse::{StockLevels, Warehouse};

/// A validated stock transfer between two warehouses.
///
/// Construction enforces the request-level rules (non-empty endpoints,
/// positive quantity, distinct endpoints); [`Transfer::apply`] enforces the
/// stock-level rule against the origin's current balance. Both are pure;
/// reading and committing records is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    origin: String,
    destination: String,
    quantity: i64,
}

impl Transfer {
    /// Validate a transfer request.
    ///
    /// Checks short-circuit in order: empty endpoint names, non-positive
    /// quantity, self-transfer.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        quantity: i64,
    ) -> DomainResult<Self> {
        let origin = origin.into();
        let destination = destination.into();

        if origin.trim().is_empty() {
            return Err(DomainError::validation(
                "originWarehouseName must not be empty",
            ));
        }
        if destination.trim().is_empty() {
            return Err(DomainError::validation(
                "destinationWarehouseName must not be empty",
            ));
        }
        if quantity <= 0 {
            return Err(DomainError::validation(
                "quantityTransfer must be a positive integer",
            ));
        }
        if origin == destination {
            return Err(DomainError::transfer_rejected(
                "origin and destination warehouses cannot be the same",
            ));
        }

        Ok(Self {
            origin,
            destination,
            quantity,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Decide the post-transfer stock levels for both endpoints.
    ///
    /// The moved quantity leaves the origin's available pool and is parked in
    /// the destination's incoming pool until settlement; the fleet total is
    /// conserved. Fails when the origin cannot cover the quantity, leaving
    /// nothing to commit.
    pub fn apply(
        &self,
        origin: &Warehouse,
        destination: &Warehouse,
    ) -> DomainResult<(StockLevels, StockLevels)> {
        if origin.available < self.quantity {
            return Err(DomainError::InsufficientQuantity {
                warehouse: origin.name.clone(),
                available: origin.available,
                requested: self.quantity,
            });
        }

        let origin_after = StockLevels::new(origin.available - self.quantity, origin.incoming);
        let destination_after =
            StockLevels::new(destination.available, destination.incoming + self.quantity);

        Ok((origin_after, destination_after))
    }
}
