use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockyard_inventory::Warehouse;

use super::r#trait::{StockUpdate, StoreError, WarehouseStore};

/// In-memory warehouse store.
///
/// Intended for tests/dev. Commit takes the write lock for the whole mutation
/// set: expectations are verified for every record first, then all targets
/// are applied, so readers never observe a half-applied set.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    records: RwLock<HashMap<String, Warehouse>>,
}

impl InMemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given fleet, keyed by warehouse name.
    pub fn with_warehouses(warehouses: impl IntoIterator<Item = Warehouse>) -> Self {
        let records = warehouses
            .into_iter()
            .map(|w| (w.name.clone(), w))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl WarehouseStore for InMemoryWarehouseStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Warehouse>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(records.get(name).cloned())
    }

    async fn find_all_with_incoming(&self) -> Result<Vec<Warehouse>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut pending: Vec<Warehouse> = records
            .values()
            .filter(|w| w.has_incoming())
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pending)
    }

    async fn commit(&self, updates: Vec<StockUpdate>) -> Result<(), StoreError> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        // Verify the whole set before touching anything.
        for update in &updates {
            let current = records.get(&update.name).ok_or_else(|| {
                StoreError::Conflict(format!("warehouse '{}' no longer exists", update.name))
            })?;
            if current.levels() != update.expected {
                return Err(StoreError::Conflict(format!(
                    "warehouse '{}' changed since it was read",
                    update.name
                )));
            }
            if update.target.available < 0 || update.target.incoming < 0 {
                return Err(StoreError::Backend(format!(
                    "stock constraint violated for warehouse '{}'",
                    update.name
                )));
            }
        }

        for update in updates {
            if let Some(record) = records.get_mut(&update.name) {
                record.available = update.target.available;
                record.incoming = update.target.incoming;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stockyard_inventory::StockLevels;

    use super::*;

    fn seeded() -> InMemoryWarehouseStore {
        InMemoryWarehouseStore::with_warehouses(vec![
            Warehouse::new("0001", "New York", 50, 0),
            Warehouse::new("0003", "Texas", 5, 20),
        ])
    }

    #[tokio::test]
    async fn find_by_name_is_exact_match() {
        let store = seeded();
        assert!(store.find_by_name("Texas").await.unwrap().is_some());
        assert!(store.find_by_name("texas").await.unwrap().is_none());
        assert!(store.find_by_name("Chicago").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_with_incoming_skips_settled_records() {
        let store = seeded();
        let pending = store.find_all_with_incoming().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Texas");
    }

    #[tokio::test]
    async fn commit_applies_the_whole_set() {
        let store = seeded();
        store
            .commit(vec![
                StockUpdate::new("New York", StockLevels::new(50, 0), StockLevels::new(40, 0)),
                StockUpdate::new("Texas", StockLevels::new(5, 20), StockLevels::new(5, 30)),
            ])
            .await
            .unwrap();

        let ny = store.find_by_name("New York").await.unwrap().unwrap();
        let texas = store.find_by_name("Texas").await.unwrap().unwrap();
        assert_eq!(ny.levels(), StockLevels::new(40, 0));
        assert_eq!(texas.levels(), StockLevels::new(5, 30));
    }

    #[tokio::test]
    async fn stale_expectation_fails_the_whole_set() {
        let store = seeded();
        let err = store
            .commit(vec![
                StockUpdate::new("New York", StockLevels::new(50, 0), StockLevels::new(40, 0)),
                // Stale expectation: Texas actually holds (5, 20).
                StockUpdate::new("Texas", StockLevels::new(5, 0), StockLevels::new(25, 0)),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Nothing was applied, including the update with a correct expectation.
        let ny = store.find_by_name("New York").await.unwrap().unwrap();
        assert_eq!(ny.levels(), StockLevels::new(50, 0));
    }

    #[tokio::test]
    async fn negative_target_is_rejected() {
        let store = seeded();
        let err = store
            .commit(vec![StockUpdate::new(
                "New York",
                StockLevels::new(50, 0),
                StockLevels::new(-1, 0),
            )])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn empty_commit_is_a_no_op() {
        let store = seeded();
        store.commit(vec![]).await.unwrap();
    }
}
