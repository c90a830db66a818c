//! Cuisine, diet and meal-occasion filters.

use crate::domain::{normalize_name, Preferences};
use crate::storage::{purpose, UserStorage, WriteOutcome};

/// Which preference list a tag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    Cuisine,
    Dietary,
    MealOccasion,
}

fn tags_mut(prefs: &mut Preferences, kind: PreferenceKind) -> &mut Vec<String> {
    match kind {
        PreferenceKind::Cuisine => &mut prefs.cuisines,
        PreferenceKind::Dietary => &mut prefs.dietary_preferences,
        PreferenceKind::MealOccasion => &mut prefs.meal_occasions,
    }
}

pub struct PreferencesStore {
    storage: UserStorage,
}

impl PreferencesStore {
    pub fn new(storage: UserStorage) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Preferences {
        self.storage.load(purpose::PREFERENCES)
    }

    pub fn save(&self, prefs: &Preferences) -> WriteOutcome {
        self.storage.save(purpose::PREFERENCES, prefs)
    }

    /// Add a tag unless an equal one (ignoring case and padding) exists.
    pub fn add(&self, kind: PreferenceKind, tag: &str) -> Preferences {
        let tag = tag.trim();
        let mut prefs = self.load();
        if tag.is_empty() {
            return prefs;
        }

        let key = normalize_name(tag);
        let tags = tags_mut(&mut prefs, kind);
        if !tags.iter().any(|t| normalize_name(t) == key) {
            tags.push(tag.to_string());
            self.save(&prefs);
        }
        prefs
    }

    pub fn remove(&self, kind: PreferenceKind, tag: &str) -> Preferences {
        let key = normalize_name(tag);
        let mut prefs = self.load();
        let tags = tags_mut(&mut prefs, kind);
        let before = tags.len();
        tags.retain(|t| normalize_name(t) != key);
        if tags.len() != before {
            self.save(&prefs);
        }
        prefs
    }
}
