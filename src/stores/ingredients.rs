//! Ingredient reconciliation.
//!
//! Three inputs feed the user's ingredient list: names typed into search,
//! names detected from a photo, and whatever was stored before. They are
//! merged into one list with at most one record per normalized name, and
//! names the user deleted stay out until they are typed in again.
//!
//! There is no in-memory copy: each operation reads the stored list,
//! transforms it and writes the whole list back.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::StoreError;
use crate::domain::{normalize_name, Ingredient, IngredientSource, DEFAULT_INGREDIENT_TYPE};
use crate::storage::{purpose, UserStorage};

/// Dedup `records` in order: first occurrence of a normalized name wins,
/// names present in `deleted` are dropped.
pub fn dedup_ingredients(records: Vec<Ingredient>, deleted: &HashSet<String>) -> Vec<Ingredient> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let key = record.normalized_name();
            !deleted.contains(&key) && seen.insert(key)
        })
        .collect()
}

pub struct IngredientStore {
    storage: UserStorage,
}

impl IngredientStore {
    pub fn new(storage: UserStorage) -> Self {
        Self { storage }
    }

    /// Current reconciled list.
    pub fn list(&self) -> Vec<Ingredient> {
        self.storage.load(purpose::INGREDIENTS)
    }

    /// Deletion set in insertion order.
    pub fn deleted(&self) -> Vec<String> {
        self.storage.load(purpose::DELETED_INGREDIENTS)
    }

    /// Most recent photo scan, minus names that were deleted at the time.
    pub fn camera_preview(&self) -> Vec<Ingredient> {
        self.storage.load(purpose::CAMERA_INGREDIENTS)
    }

    fn deleted_set(&self) -> HashSet<String> {
        self.deleted().into_iter().collect()
    }

    /// Merge `sources` after the stored list, dedup, persist and return.
    pub fn reconcile(&self, sources: Vec<Vec<Ingredient>>) -> Vec<Ingredient> {
        let mut merged = self.list();
        let stored = merged.len();
        for source in sources {
            merged.extend(source);
        }

        let deleted = self.deleted_set();
        let result = dedup_ingredients(merged, &deleted);
        debug!(
            "Reconciled {} stored + new records into {} ingredients ({} deleted names)",
            stored,
            result.len(),
            deleted.len()
        );

        self.storage.save(purpose::INGREDIENTS, &result);
        result
    }

    /// Remove the record at `index` and remember its name as deleted.
    pub fn delete(&self, index: usize) -> Result<Vec<Ingredient>, StoreError> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }

        let removed = list.remove(index);
        if self.storage.save(purpose::INGREDIENTS, &list).is_failure() {
            warn!("Could not save the list without {}; it was kept", removed.name);
            return Ok(self.list());
        }
        self.add_deleted(&removed.name);

        info!("Deleted ingredient {}", removed.name);
        Ok(list)
    }

    /// Rename the record at `index` in place.
    ///
    /// Renaming onto another record's normalized name is rejected, so the
    /// list never holds two records for one name. A typed name counts as a
    /// re-add: it is taken out of the deletion set so the next merge keeps it.
    pub fn edit(&self, index: usize, new_name: &str) -> Result<Vec<Ingredient>, StoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let mut list = self.list();
        if index >= list.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }

        let key = normalize_name(new_name);
        if let Some(existing) = list
            .iter()
            .enumerate()
            .find(|(i, record)| *i != index && record.normalized_name() == key)
            .map(|(_, record)| record.name.clone())
        {
            return Err(StoreError::NameCollision { existing });
        }

        if !self.restore_deleted(new_name) {
            warn!("Could not clear {} from the deletion set; rename skipped", key);
            return Ok(self.list());
        }
        list[index].name = new_name.to_string();
        if self.storage.save(purpose::INGREDIENTS, &list).is_failure() {
            warn!("Could not save rename to {}", new_name);
            return Ok(self.list());
        }
        Ok(list)
    }

    /// Add `name` to the deletion set. Idempotent.
    pub fn add_deleted(&self, name: &str) -> Vec<String> {
        let key = normalize_name(name);
        let mut deleted = self.deleted();
        if !key.is_empty() && !deleted.contains(&key) {
            deleted.push(key);
            if self
                .storage
                .save(purpose::DELETED_INGREDIENTS, &deleted)
                .is_failure()
            {
                warn!("Could not update the deletion set");
            }
        }
        deleted
    }

    /// Take `name` back out of the deletion set. False if it is still there.
    fn restore_deleted(&self, name: &str) -> bool {
        let key = normalize_name(name);
        let mut deleted = self.deleted();
        let before = deleted.len();
        deleted.retain(|d| *d != key);
        if deleted.len() == before {
            return true;
        }
        debug!("Re-added {} clears it from the deletion set", key);
        !self
            .storage
            .save(purpose::DELETED_INGREDIENTS, &deleted)
            .is_failure()
    }

    /// Search flow: the user typed `name`. A manual add overrides an
    /// earlier deletion of the same name.
    pub fn add_manual(&self, name: &str, kind: Option<&str>) -> Result<Vec<Ingredient>, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let kind = kind
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_INGREDIENT_TYPE);

        self.restore_deleted(name);
        let record = Ingredient::new(name, kind, IngredientSource::Manual);
        Ok(self.reconcile(vec![vec![record]]))
    }

    /// Camera flow: store the detections minus deleted names as the
    /// preview, then merge them into the list.
    pub fn add_detected(&self, detections: Vec<Ingredient>) -> Vec<Ingredient> {
        let preview = dedup_ingredients(detections, &self.deleted_set());
        self.storage.save(purpose::CAMERA_INGREDIENTS, &preview);
        self.reconcile(vec![preview])
    }

    /// Forget every ingredient, detection and deletion for this user.
    pub fn clear(&self) {
        self.storage.remove(purpose::INGREDIENTS);
        self.storage.remove(purpose::CAMERA_INGREDIENTS);
        self.storage.remove(purpose::DELETED_INGREDIENTS);
    }
}
