//! Recipe detail: turn the ingredients the user lacks into shopping entries.

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::domain::{normalize_name, Ingredient, MenuRecommendation, ShoppingItem};
use crate::stores::Stores;

/// Recipe ingredients whose normalized name is not in `pantry`.
pub fn missing_ingredients(menu: &MenuRecommendation, pantry: &[Ingredient]) -> Vec<ShoppingItem> {
    let have: HashSet<String> = pantry.iter().map(Ingredient::normalized_name).collect();
    let image = menu.image.clone().unwrap_or_default();

    menu.ingredients
        .iter()
        .filter(|ing| {
            let key = normalize_name(&ing.name);
            !key.is_empty() && !have.contains(&key)
        })
        .map(|ing| {
            ShoppingItem::new(
                ing.name.trim(),
                ing.quantity.clone().unwrap_or_default(),
                image.clone(),
            )
        })
        .collect()
}

/// Add the missing ingredients of cached menu `menu_index` to the shopping
/// list. Returns the items offered and the resulting list.
pub fn add_missing_to_shopping(
    stores: &Stores,
    menu_index: usize,
) -> Result<(Vec<ShoppingItem>, Vec<ShoppingItem>)> {
    let mut menu = stores
        .menus
        .get(menu_index)
        .with_context(|| format!("No cached menu #{}. Run 'pantry recommend' first.", menu_index + 1))?;
    if menu.image.as_deref().unwrap_or_default().is_empty() {
        menu.image = stores.menus.image_for(&menu.name);
    }

    let missing = missing_ingredients(&menu, &stores.ingredients.list());
    let list = stores.shopping.add_items(missing.clone());
    Ok((missing, list))
}
