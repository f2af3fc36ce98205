//! Request DTOs, the typed parsing step, and response mapping helpers.
//!
//! Request bodies deserialize with `Option` fields so that a missing field is
//! a uniform `ValidationError` from `parse()` rather than a framework-shaped
//! rejection.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use stockyard_core::{DomainError, DomainResult};
use stockyard_inventory::{Transfer, Warehouse};

// -------------------------
// Request DTOs
// -------------------------

/// Quantity Lookup request body.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    #[serde(rename = "warehouseName")]
    pub warehouse_name: Option<String>,
}

impl QuantityRequest {
    pub fn parse(self) -> DomainResult<String> {
        match self.warehouse_name {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(DomainError::validation(
                "Missing 'warehouseName' in request body.",
            )),
        }
    }
}

/// Transfer request body.
///
/// `quantityTransfer` is accepted as a JSON number or a string holding an
/// integer; everything else is a validation failure.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "originWarehouseName")]
    pub origin_warehouse_name: Option<String>,
    #[serde(rename = "destinationWarehouseName")]
    pub destination_warehouse_name: Option<String>,
    #[serde(rename = "quantityTransfer")]
    pub quantity_transfer: Option<JsonValue>,
}

impl TransferRequest {
    pub fn parse(self) -> DomainResult<Transfer> {
        let (Some(origin), Some(destination), Some(quantity)) = (
            self.origin_warehouse_name,
            self.destination_warehouse_name,
            self.quantity_transfer,
        ) else {
            return Err(DomainError::validation(
                "Missing one or more required fields: \
                 originWarehouseName, destinationWarehouseName, quantityTransfer.",
            ));
        };

        let quantity = parse_quantity(&quantity)?;
        Transfer::new(origin, destination, quantity)
    }
}

fn parse_quantity(value: &JsonValue) -> DomainResult<i64> {
    let quantity = match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match quantity {
        Some(q) if q > 0 => Ok(q),
        _ => Err(DomainError::validation(
            "quantityTransfer must be a positive integer.",
        )),
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn warehouse_to_json(warehouse: &Warehouse) -> serde_json::Value {
    serde_json::json!({
        "warehouseName": warehouse.name,
        "quantityAvailable": warehouse.available,
        "quantityIncoming": warehouse.incoming,
        "quantityForecast": warehouse.forecast(),
    })
}

pub fn transfer_to_json(transfer: &Transfer) -> serde_json::Value {
    serde_json::json!({
        "message": "Success - Transfer Initiated",
        "originWarehouseName": transfer.origin(),
        "destinationWarehouseName": transfer.destination(),
        "quantityTransfer": transfer.quantity(),
    })
}

pub fn settlement_to_json(settled: usize) -> serde_json::Value {
    if settled == 0 {
        serde_json::json!({
            "message": "Success - No pending deliveries to process.",
        })
    } else {
        serde_json::json!({
            "message": format!("Success - Deliveries processed for {settled} warehouses."),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_request_rejects_missing_and_blank_names() {
        assert!(QuantityRequest {
            warehouse_name: None
        }
        .parse()
        .is_err());
        assert!(QuantityRequest {
            warehouse_name: Some("   ".to_string())
        }
        .parse()
        .is_err());
    }

    #[test]
    fn transfer_quantity_accepts_integer_and_string_forms() {
        for value in [serde_json::json!(10), serde_json::json!("10")] {
            let transfer = TransferRequest {
                origin_warehouse_name: Some("New York".to_string()),
                destination_warehouse_name: Some("Boston".to_string()),
                quantity_transfer: Some(value),
            }
            .parse()
            .unwrap();
            assert_eq!(transfer.quantity(), 10);
        }
    }

    #[test]
    fn transfer_quantity_rejects_non_integers() {
        for value in [
            serde_json::json!(10.5),
            serde_json::json!("abc"),
            serde_json::json!(0),
            serde_json::json!(-5),
            serde_json::json!(true),
            serde_json::json!(null),
        ] {
            let result = TransferRequest {
                origin_warehouse_name: Some("New York".to_string()),
                destination_warehouse_name: Some("Boston".to_string()),
                quantity_transfer: Some(value.clone()),
            }
            .parse();
            assert!(
                matches!(result, Err(DomainError::Validation(_))),
                "value {value} should be rejected"
            );
        }
    }

    #[test]
    fn transfer_request_requires_all_fields() {
        let result = TransferRequest {
            origin_warehouse_name: Some("New York".to_string()),
            destination_warehouse_name: None,
            quantity_transfer: Some(serde_json::json!(1)),
        }
        .parse();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
