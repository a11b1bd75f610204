//! The built-in ramen stall table: nine ingredients, eight recipes, and
//! six customer archetypes.

use ramen_types::{ArchetypeId, IngredientId, MenuId};

use crate::catalog::{Archetype, Ingredient, Recipe, RecipeCatalog};

/// `(key, display name)` for every standard ingredient.
const INGREDIENTS: &[(&str, &str)] = &[
    ("water", "Water"),
    ("noodle", "Noodles"),
    ("soup", "Soup Base"),
    ("egg", "Egg"),
    ("kimchi", "Kimchi"),
    ("seafood", "Seafood"),
    ("cheese", "Cheese"),
    ("tteok", "Rice Cake"),
    ("chili", "Chili"),
];

fn recipe(
    id: &str,
    name: &str,
    ingredients: &[&str],
    cook_time_ms: u64,
    price: u64,
    unlock_cost: u64,
) -> Recipe {
    Recipe {
        id: MenuId::from(id),
        name: name.to_owned(),
        ingredients: ingredients.iter().map(|i| IngredientId::from(*i)).collect(),
        cook_time_ms,
        price,
        unlock_cost,
    }
}

fn archetype(
    id: &str,
    name: &str,
    patience_ms: u64,
    tip_multiplier: f64,
    spawn_weight: u32,
    allowed_menus: Option<&[&str]>,
) -> Archetype {
    Archetype {
        id: ArchetypeId::from(id),
        name: name.to_owned(),
        patience_ms,
        tip_multiplier,
        spawn_weight,
        allowed_menus: allowed_menus.map(|menus| menus.iter().map(|m| MenuId::from(*m)).collect()),
    }
}

impl RecipeCatalog {
    /// The standard table the game ships with.
    ///
    /// `basic` is a strict prefix of `egg`, `kimchi`, `spicy`, and `cheese`,
    /// so finishing `basic` always leaves the pot ambiguous until the cook
    /// confirms or adds a fourth ingredient.
    pub fn standard() -> Self {
        Self {
            ingredients: INGREDIENTS
                .iter()
                .map(|(id, name)| Ingredient {
                    id: IngredientId::from(*id),
                    name: (*name).to_owned(),
                })
                .collect(),
            recipes: vec![
                recipe("basic", "Basic Ramen", &["water", "noodle", "soup"], 5000, 3000, 0),
                recipe("egg", "Egg Ramen", &["water", "noodle", "soup", "egg"], 6000, 4000, 0),
                recipe(
                    "kimchi",
                    "Kimchi Ramen",
                    &["water", "noodle", "soup", "kimchi"],
                    6000,
                    4500,
                    5000,
                ),
                recipe(
                    "spicy",
                    "Spicy Ramen",
                    &["water", "noodle", "soup", "chili"],
                    6000,
                    4500,
                    6000,
                ),
                recipe(
                    "tteok",
                    "Rice Cake Ramen",
                    &["water", "tteok", "noodle", "soup"],
                    7000,
                    5000,
                    7000,
                ),
                recipe(
                    "cheese",
                    "Cheese Ramen",
                    &["water", "noodle", "soup", "cheese"],
                    7000,
                    5500,
                    8000,
                ),
                recipe(
                    "seafood",
                    "Seafood Ramen",
                    &["water", "seafood", "noodle", "soup"],
                    8000,
                    6000,
                    10_000,
                ),
                recipe(
                    "special",
                    "Special Ramen",
                    &["water", "seafood", "noodle", "soup", "egg", "kimchi"],
                    10_000,
                    10_000,
                    20_000,
                ),
            ],
            archetypes: vec![
                archetype("normal", "Regular", 30_000, 1.0, 40, None),
                archetype("rush", "Office Worker in a Hurry", 15_000, 1.5, 20, None),
                archetype("grandma", "Easygoing Grandma", 45_000, 1.0, 15, None),
                archetype("vip", "VIP", 25_000, 2.0, 5, None),
                archetype("student", "Student", 35_000, 0.8, 15, None),
                archetype("child", "Child", 40_000, 0.7, 5, Some(&["basic", "egg"])),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_sizes() {
        let catalog = RecipeCatalog::standard();
        assert_eq!(catalog.ingredients.len(), 9);
        assert_eq!(catalog.recipes.len(), 8);
        assert_eq!(catalog.archetypes.len(), 6);
        assert_eq!(catalog.total_spawn_weight(), 100);
    }

    #[test]
    fn child_only_orders_starter_menus() {
        let catalog = RecipeCatalog::standard();
        let child = catalog.archetype(&ArchetypeId::from("child"));
        assert_eq!(
            child.and_then(|c| c.allowed_menus.clone()),
            Some(vec![MenuId::from("basic"), MenuId::from("egg")])
        );
    }
}
