use serde::{Deserialize, Serialize};

use crate::PantryError;

/// One ingredient the user has on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FridgeItem {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub image_url: String,
}

fn default_quantity() -> u32 {
    1
}

impl FridgeItem {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: 1,
            image_url: String::new(),
        }
    }

    fn same_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Body of the legacy `addIngredient` / `deleteIngredient` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientName {
    #[serde(default)]
    pub ingredient: String,
}

/// Add `item` to `fridge`. A name already present (ignoring ASCII case) has
/// its quantity increased and its image replaced only when the new one is set.
pub fn add_item(fridge: &mut Vec<FridgeItem>, item: FridgeItem) -> Result<(), PantryError> {
    let name = item.name.trim();
    if name.is_empty() {
        return Err(PantryError::InvalidInput("No ingredient provided".into()));
    }

    match fridge.iter_mut().find(|existing| existing.same_name(name)) {
        Some(existing) => {
            existing.quantity = existing.quantity.saturating_add(item.quantity.max(1));
            if !item.image_url.is_empty() {
                existing.image_url = item.image_url;
            }
        }
        None => fridge.push(FridgeItem {
            name: name.to_string(),
            quantity: item.quantity.max(1),
            image_url: item.image_url,
        }),
    }
    Ok(())
}

/// Add a bare ingredient name with quantity 1 unless it is already present.
/// Returns `true` when the fridge changed.
pub fn add_name(fridge: &mut Vec<FridgeItem>, name: &str) -> Result<bool, PantryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PantryError::InvalidInput("No ingredient provided".into()));
    }
    if fridge.iter().any(|existing| existing.same_name(name)) {
        return Ok(false);
    }
    fridge.push(FridgeItem::named(name));
    Ok(true)
}

/// Remove the first item whose name matches.
pub fn remove_item(fridge: &mut Vec<FridgeItem>, name: &str) -> Result<FridgeItem, PantryError> {
    if name.trim().is_empty() {
        return Err(PantryError::InvalidInput("No ingredient provided".into()));
    }
    let idx = fridge
        .iter()
        .position(|existing| existing.same_name(name))
        .ok_or_else(|| PantryError::NotFound("Ingredient not found".into()))?;
    Ok(fridge.remove(idx))
}

/// Comma-separated ingredient list in the shape the recipe API expects.
pub fn ingredient_query(fridge: &[FridgeItem]) -> String {
    fridge
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
