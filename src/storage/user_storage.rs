//! Per-user typed view over a key-value backend.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::backend::{KeyValueBackend, StorageError};

/// Key of a persisted record: `{purpose}_{userId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    purpose: String,
    user_id: String,
}

impl StorageKey {
    pub fn new(purpose: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            user_id: user_id.into(),
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.purpose, self.user_id)
    }
}

/// Result of a write through `UserStorage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// No user id, nothing was stored
    Skipped,
    /// The backend rejected the write; already logged
    Failed,
}

impl WriteOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, WriteOutcome::Failed)
    }
}

/// Storage bound to one user (or to nobody).
///
/// Reads always yield a usable value: missing, corrupt or unreadable data
/// comes back as `T::default()`. Writes without a user id are skipped.
#[derive(Clone)]
pub struct UserStorage {
    backend: Arc<dyn KeyValueBackend>,
    user_id: Option<String>,
}

impl UserStorage {
    pub fn new(backend: Arc<dyn KeyValueBackend>, user_id: Option<String>) -> Self {
        let user_id = user_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self { backend, user_id }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn key(&self, purpose: &str) -> Option<StorageKey> {
        self.user_id
            .as_ref()
            .map(|user_id| StorageKey::new(purpose, user_id.clone()))
    }

    /// Load the value stored for `purpose`, or the empty default.
    pub fn load<T>(&self, purpose: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(key) = self.key(purpose) else {
            return T::default();
        };

        match self.try_load(&key.to_string()) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!("Falling back to empty {}: {}", key, e);
                T::default()
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Serialize and store `value` under `purpose`. Never returns an error.
    pub fn save<T: Serialize>(&self, purpose: &str, value: &T) -> WriteOutcome {
        let Some(key) = self.key(purpose) else {
            debug!("No user id, skipping write of {}", purpose);
            return WriteOutcome::Skipped;
        };
        let key = key.to_string();

        let result = serde_json::to_string(value)
            .map_err(|source| StorageError::Serialize {
                key: key.clone(),
                source,
            })
            .and_then(|raw| self.backend.write(&key, &raw));

        match result {
            Ok(()) => WriteOutcome::Written,
            Err(e) => {
                warn!("Failed to persist {}: {}", key, e);
                WriteOutcome::Failed
            }
        }
    }

    /// Drop whatever is stored under `purpose`.
    pub fn remove(&self, purpose: &str) -> WriteOutcome {
        let Some(key) = self.key(purpose) else {
            return WriteOutcome::Skipped;
        };
        match self.backend.remove(&key.to_string()) {
            Ok(()) => WriteOutcome::Written,
            Err(e) => {
                warn!("Failed to remove {}: {}", key, e);
                WriteOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ingredient, Preferences, ShoppingItem};
    use crate::storage::backend::{FileBackend, MemoryBackend, DEFAULT_QUOTA_BYTES};
    use tempfile::TempDir;

    fn memory_storage(user: Option<&str>) -> (Arc<MemoryBackend>, UserStorage) {
        let backend = Arc::new(MemoryBackend::new());
        let storage = UserStorage::new(backend.clone(), user.map(str::to_string));
        (backend, storage)
    }

    #[test]
    fn test_key_format() {
        let (_, storage) = memory_storage(Some("u42"));
        assert_eq!(
            storage.key("ingredients").unwrap().to_string(),
            "ingredients_u42"
        );
        assert_eq!(
            storage.key("Preferences").unwrap().to_string(),
            "Preferences_u42"
        );
    }

    #[test]
    fn test_round_trip_ingredients() {
        let (_, storage) = memory_storage(Some("u1"));
        let list = vec![
            Ingredient::manual("Tomato"),
            Ingredient::detected("Onion", "Vegetables"),
        ];
        assert_eq!(storage.save("ingredients", &list), WriteOutcome::Written);
        let loaded: Vec<Ingredient> = storage.load("ingredients");
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_round_trip_on_disk() {
        let tmp = TempDir::new().unwrap();
        let backend = Arc::new(FileBackend::new(tmp.path(), DEFAULT_QUOTA_BYTES).unwrap());
        let items = vec![ShoppingItem::new("Milk", "1 l", "")];

        UserStorage::new(backend.clone(), Some("u1".into())).save("shoppingList", &items);

        // A fresh view over the same directory sees the write
        let reopened = UserStorage::new(backend, Some("u1".into()));
        let loaded: Vec<ShoppingItem> = reopened.load("shoppingList");
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_anonymous_reads_default_and_skips_writes() {
        let (backend, storage) = memory_storage(None);
        assert!(storage.is_anonymous());

        let outcome = storage.save("ingredients", &vec![Ingredient::manual("Egg")]);
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert!(backend.read("ingredients_").unwrap().is_none());

        let loaded: Vec<Ingredient> = storage.load("ingredients");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_blank_user_id_is_anonymous() {
        let (_, storage) = memory_storage(Some("   "));
        assert!(storage.is_anonymous());
    }

    #[test]
    fn test_users_are_isolated() {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
        let alice = UserStorage::new(backend.clone(), Some("alice".into()));
        let bob = UserStorage::new(backend, Some("bob".into()));

        alice.save("ingredients", &vec![Ingredient::manual("Rice")]);
        let bobs: Vec<Ingredient> = bob.load("ingredients");
        assert!(bobs.is_empty());
    }

    #[test]
    fn test_corrupt_json_loads_default() {
        let (backend, storage) = memory_storage(Some("u1"));
        backend.insert_raw("Preferences_u1", "{not json");
        let prefs: Preferences = storage.load("Preferences");
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_quota_failure_is_swallowed() {
        let backend = Arc::new(MemoryBackend::with_quota(8));
        let storage = UserStorage::new(backend, Some("u1".into()));

        let big: Vec<Ingredient> = (0..10)
            .map(|i| Ingredient::manual(format!("item {}", i)))
            .collect();
        assert_eq!(storage.save("ingredients", &big), WriteOutcome::Failed);

        // Previous (absent) value is still what readers observe
        let loaded: Vec<Ingredient> = storage.load("ingredients");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_remove() {
        let (_, storage) = memory_storage(Some("u1"));
        storage.save("menus", &vec!["a".to_string()]);
        assert_eq!(storage.remove("menus"), WriteOutcome::Written);
        let loaded: Vec<String> = storage.load("menus");
        assert!(loaded.is_empty());
    }
}
