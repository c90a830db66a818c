//! Domain types shared across modules.
//!
//! Ingredient, shopping and preference records are persisted by the stores
//! and exchanged with the remote services, so their JSON shape is fixed here.

use serde::{Deserialize, Serialize};

use crate::stores::StoreError;

/// Category assigned to manually typed ingredients.
pub const DEFAULT_INGREDIENT_TYPE: &str = "Other";

/// Normalize an ingredient name into its dedup key (trimmed, lowercased).
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Where an ingredient record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSource {
    Manual,
    Camera,
}

impl std::fmt::Display for IngredientSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngredientSource::Manual => write!(f, "manual"),
            IngredientSource::Camera => write!(f, "camera"),
        }
    }
}

/// A single ingredient the user has on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Category tag, e.g. "Vegetables"
    #[serde(rename = "type")]
    pub kind: String,
    pub source: IngredientSource,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, source: IngredientSource) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            source,
        }
    }

    /// Manually typed ingredient with the default category.
    #[cfg(test)]
    pub fn manual(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_INGREDIENT_TYPE, IngredientSource::Manual)
    }

    /// Ingredient reported by image recognition.
    pub fn detected(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(name, kind, IngredientSource::Camera)
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Shopping list entry. Unique by exact `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub image: String,
}

impl ShoppingItem {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            image: image.into(),
        }
    }
}

/// Menu filters sent along with recommendation requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub meal_occasions: Vec<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty()
            && self.dietary_preferences.is_empty()
            && self.meal_occasions.is_empty()
    }
}

/// Ingredient line of a recommended recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// A menu suggested by the recommendation service.
///
/// Only the fields the client acts on are typed; anything else the service
/// returns is kept in `extra` so cached menus round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecommendation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Review score, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, StoreError> {
        match value {
            1..=5 => Ok(Self(value as u8)),
            _ => Err(StoreError::InvalidRating(value)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}
