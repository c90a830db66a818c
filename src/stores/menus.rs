//! Cache of the last menu recommendations and their images.
//!
//! Kept per user like everything else in storage, so a shared device never
//! shows one account another account's menus.

use std::collections::HashMap;

use crate::domain::MenuRecommendation;
use crate::storage::{purpose, UserStorage, WriteOutcome};

pub struct RecommendationCache {
    storage: UserStorage,
}

impl RecommendationCache {
    pub fn new(storage: UserStorage) -> Self {
        Self { storage }
    }

    /// Replace the cached menus and record any images they carry.
    pub fn store(&self, menus: &[MenuRecommendation]) -> WriteOutcome {
        let mut images = self.images();
        for menu in menus {
            if let Some(url) = menu.image.as_deref().filter(|u| !u.is_empty()) {
                images.insert(menu.name.clone(), url.to_string());
            }
        }
        self.storage.save(purpose::IMAGES, &images);
        self.storage.save(purpose::MENUS, &menus)
    }

    pub fn menus(&self) -> Vec<MenuRecommendation> {
        self.storage.load(purpose::MENUS)
    }

    pub fn get(&self, index: usize) -> Option<MenuRecommendation> {
        self.menus().into_iter().nth(index)
    }

    pub fn image_for(&self, menu_name: &str) -> Option<String> {
        self.images().remove(menu_name)
    }

    fn images(&self) -> HashMap<String, String> {
        self.storage.load(purpose::IMAGES)
    }
}
