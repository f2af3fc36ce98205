use serde::{Deserialize, Serialize};

use stockyard_core::WarehouseId;

/// Stock counters of a single warehouse.
///
/// Both counters are non-negative at rest; every committed mutation preserves
/// that.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    /// Quantity physically present and eligible for outbound transfer.
    pub available: i64,
    /// Quantity in transit, not yet transferable, pending settlement.
    pub incoming: i64,
}

impl StockLevels {
    pub fn new(available: i64, incoming: i64) -> Self {
        Self {
            available,
            incoming,
        }
    }

    /// Derived total (available + incoming). Never persisted.
    pub fn forecast(&self) -> i64 {
        self.available + self.incoming
    }

    /// Post-settlement levels: incoming stock becomes available.
    pub fn settle(self) -> StockLevels {
        StockLevels {
            available: self.available + self.incoming,
            incoming: 0,
        }
    }
}

/// The sole persisted entity: one record per warehouse.
///
/// `name` uniquely identifies a warehouse and is the lookup key for every
/// operation; `id` is an opaque external reference. Records are created only
/// by seeding; operations mutate the stock counters of existing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub available: i64,
    pub incoming: i64,
}

impl Warehouse {
    pub fn new(id: impl Into<WarehouseId>, name: impl Into<String>, available: i64, incoming: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            available,
            incoming,
        }
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels::new(self.available, self.incoming)
    }

    pub fn forecast(&self) -> i64 {
        self.levels().forecast()
    }

    /// Whether this warehouse has stock pending settlement.
    pub fn has_incoming(&self) -> bool {
        self.incoming > 0
    }
}
