//! Shopping list built from a recipe's missing ingredients.

use std::collections::HashMap;

use tracing::debug;

use super::StoreError;
use crate::domain::ShoppingItem;
use crate::storage::{purpose, UserStorage};

/// Dedup by exact name. The last value for a name wins and sits where the
/// name first appeared.
pub fn dedup_shopping(items: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<ShoppingItem> = Vec::with_capacity(items.len());

    for item in items {
        match positions.get(&item.name) {
            Some(&pos) => result[pos] = item,
            None => {
                positions.insert(item.name.clone(), result.len());
                result.push(item);
            }
        }
    }

    result
}

pub struct ShoppingListStore {
    storage: UserStorage,
}

impl ShoppingListStore {
    pub fn new(storage: UserStorage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> Vec<ShoppingItem> {
        self.storage.load(purpose::SHOPPING_LIST)
    }

    /// Append `new_items` to the stored list and dedup.
    pub fn add_items(&self, new_items: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
        let mut list = self.list();
        let added = new_items.len();
        list.extend(new_items);

        let result = dedup_shopping(list);
        debug!("Shopping list now has {} items ({} offered)", result.len(), added);

        self.storage.save(purpose::SHOPPING_LIST, &result);
        result
    }

    pub fn remove_at(&self, index: usize) -> Result<Vec<ShoppingItem>, StoreError> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        list.remove(index);
        self.storage.save(purpose::SHOPPING_LIST, &list);
        Ok(list)
    }

    pub fn clear(&self) {
        self.storage.remove(purpose::SHOPPING_LIST);
    }
}
