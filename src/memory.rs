use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::{Food, FoodChanges, NewFood};
use crate::store::{FoodStore, StoreError};

/// In-process store backing the controller and HTTP tests. It keeps the
/// same keep-existing update semantics as the MySQL store. Ids start at 1
/// and are never reused.
#[derive(Debug, Default)]
pub struct MemoryFoodStore {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Food>,
}

impl MemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        // A panic while holding the lock cannot leave a row half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FoodStore for MemoryFoodStore {
    fn list(&self) -> Result<Vec<Food>, StoreError> {
        Ok(self.table().rows.values().cloned().collect())
    }

    fn find(&self, id: i32) -> Result<Option<Food>, StoreError> {
        Ok(self.table().rows.get(&id).cloned())
    }

    fn insert(&self, food: &NewFood) -> Result<Option<Food>, StoreError> {
        let mut table = self.table();
        table.last_id += 1;
        let food = food.clone().with_id(table.last_id);
        table.rows.insert(food.id, food.clone());
        Ok(Some(food))
    }

    fn update(&self, id: i32, changes: &FoodChanges) -> Result<Option<Food>, StoreError> {
        let mut table = self.table();
        Ok(table.rows.get_mut(&id).map(|food| {
            changes.apply_to(food);
            food.clone()
        }))
    }

    fn delete(&self, id: i32) -> Result<Option<Food>, StoreError> {
        Ok(self.table().rows.remove(&id))
    }

    fn ping(&self) -> Result<String, StoreError> {
        Ok("pong".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> NewFood {
        NewFood {
            name: "Rice".to_string(),
            calories: 130.0,
            proteins: 2.7,
            fats: 0.3,
            carbs: 28.0,
            fiber: 0.4,
            sugar: 0.1,
            sodium: 1.0,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = MemoryFoodStore::new();
        let first = store.insert(&rice()).unwrap().unwrap();
        let second = store.insert(&rice()).unwrap().unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryFoodStore::new();
        let first = store.insert(&rice()).unwrap().unwrap();
        store.delete(first.id).unwrap();
        let second = store.insert(&rice()).unwrap().unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn update_of_missing_row_is_none() {
        let store = MemoryFoodStore::new();
        assert_eq!(store.update(9, &FoodChanges::default()).unwrap(), None);
    }

    #[test]
    fn delete_returns_snapshot_once() {
        let store = MemoryFoodStore::new();
        let food = store.insert(&rice()).unwrap().unwrap();
        assert_eq!(store.delete(food.id).unwrap(), Some(food.clone()));
        assert_eq!(store.delete(food.id).unwrap(), None);
        assert_eq!(store.find(food.id).unwrap(), None);
    }
}
