//! Persistent, per-user key-value storage.
//!
//! Every record is one JSON document stored under `{purpose}_{userId}`.
//! Callers never see storage failures: reads fall back to empty defaults and
//! failed writes are logged and reported as `WriteOutcome::Failed`.

mod backend;
mod user_storage;

#[cfg(test)]
pub use backend::MemoryBackend;
pub use backend::{FileBackend, KeyValueBackend, DEFAULT_QUOTA_BYTES};
pub use user_storage::{UserStorage, WriteOutcome};

/// Record purposes, i.e. the prefix of every storage key.
pub mod purpose {
    pub const INGREDIENTS: &str = "ingredients";
    pub const CAMERA_INGREDIENTS: &str = "cameraIngredients";
    pub const DELETED_INGREDIENTS: &str = "deletedIngredients";
    pub const PREFERENCES: &str = "Preferences";
    pub const SHOPPING_LIST: &str = "shoppingList";
    pub const MENUS: &str = "menus";
    pub const IMAGES: &str = "images";
}
