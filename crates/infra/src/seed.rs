//! Initial warehouse fleet.
//!
//! Seeding is a bootstrap collaborator, not a business operation: the fleet
//! is inserted once into an empty store at startup, and the operations never
//! create or delete records afterwards.

use stockyard_inventory::Warehouse;

/// The fleet inserted when a store starts out empty.
pub fn initial_warehouses() -> Vec<Warehouse> {
    vec![
        Warehouse::new("0001", "New York", 50, 0),
        Warehouse::new("0002", "Boston", 3, 0),
        Warehouse::new("0003", "Texas", 5, 20),
    ]
}
