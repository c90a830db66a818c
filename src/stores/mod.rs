//! Per-user stores built on top of `storage::UserStorage`.
//!
//! Each store is a read-transform-write contract over one or more storage
//! keys. Stores hold no state of their own, so any number of them may be
//! created over the same user's storage and they will agree on the next read.

mod error;
mod ingredients;
mod menus;
mod preferences;
mod shopping;

pub use error::StoreError;
pub use ingredients::IngredientStore;
pub use menus::RecommendationCache;
pub use preferences::{PreferenceKind, PreferencesStore};
pub use shopping::ShoppingListStore;

use crate::storage::UserStorage;

/// All stores for one user, sharing one storage handle.
pub struct Stores {
    pub ingredients: IngredientStore,
    pub shopping: ShoppingListStore,
    pub preferences: PreferencesStore,
    pub menus: RecommendationCache,
}

impl Stores {
    pub fn new(storage: UserStorage) -> Self {
        Self {
            ingredients: IngredientStore::new(storage.clone()),
            shopping: ShoppingListStore::new(storage.clone()),
            preferences: PreferencesStore::new(storage.clone()),
            menus: RecommendationCache::new(storage),
        }
    }
}
