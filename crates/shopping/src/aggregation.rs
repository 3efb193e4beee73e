use std::collections::HashMap;

use mealplanner_shared::{meal::Ingredient, mealplan::MealPlanEntry};
use serde::Serialize;

use crate::normalize::merge_key;

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub name: String,
    pub total_quantity: f64,
    pub unit: String,
}

/// Accumulates ingredients into merge groups keyed by [`merge_key`].
///
/// Groups keep the order in which their key was first seen; the first
/// occurrence provides the display name and unit, later ones only add to the
/// quantity.
#[derive(Debug, Default)]
pub struct ShoppingListBuilder {
    positions: HashMap<String, usize>,
    items: Vec<ShoppingItem>,
}

impl ShoppingListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ingredient(&mut self, ingredient: &Ingredient) {
        let key = merge_key(&ingredient.name, &ingredient.unit);

        match self.positions.get(&key) {
            Some(&position) => self.items[position].total_quantity += ingredient.quantity,
            None => {
                self.positions.insert(key, self.items.len());
                self.items.push(ShoppingItem {
                    name: ingredient.name.to_owned(),
                    total_quantity: ingredient.quantity,
                    unit: ingredient.unit.to_owned(),
                });
            }
        }
    }

    /// Adds the ingredients of the entry's meal. Entries without a meal are
    /// skipped.
    pub fn add_entry(&mut self, entry: &MealPlanEntry) {
        let Some(meal) = &entry.meal else {
            return;
        };

        for ingredient in &meal.ingredients {
            self.add_ingredient(ingredient);
        }
    }

    /// Items sorted by name ignoring case. The sort is stable so names that
    /// only differ in case keep their insertion order. Keys use full Unicode
    /// lowercasing, which orders a few non-ASCII names (`ß`, dotted `İ`)
    /// differently from a char-by-char case fold, and that is intended.
    pub fn finish(self) -> Vec<ShoppingItem> {
        let mut items = self.items;
        items.sort_by_cached_key(|item| item.name.to_lowercase());
        items
    }
}

/// Builds the consolidated shopping list of a set of plan entries.
pub fn build<'a>(entries: impl IntoIterator<Item = &'a MealPlanEntry>) -> Vec<ShoppingItem> {
    let mut builder = ShoppingListBuilder::new();
    for entry in entries {
        builder.add_entry(entry);
    }

    builder.finish()
}
