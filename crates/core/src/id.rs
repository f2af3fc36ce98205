//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};

/// Opaque short identifier of a warehouse (e.g. `"0001"`).
///
/// Unique and immutable after creation. Lookups key on the warehouse *name*;
/// this id exists for external reference only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(String);

impl WarehouseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for WarehouseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WarehouseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
