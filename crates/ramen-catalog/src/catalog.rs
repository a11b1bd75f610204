//! The read-only catalog of ingredients, recipes, and customer archetypes.
//!
//! The catalog is injected into the cooking station and the seating manager
//! as an immutable dependency. Recipes are kept in a `Vec` so that their
//! declaration order is preserved: the cooking station breaks ties between
//! several exact matches by taking the first one declared.

use std::collections::BTreeSet;

use ramen_types::{ArchetypeId, IngredientId, MenuId};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Something the cook can drop into a pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog key.
    pub id: IngredientId,
    /// Display name.
    pub name: String,
}

/// An ordered ingredient sequence plus its price and timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Menu key of the finished dish.
    pub id: MenuId,
    /// Display name.
    pub name: String,
    /// Ingredients in the exact order they must be added.
    pub ingredients: Vec<IngredientId>,
    /// Time the dish needs on the stove once committed.
    pub cook_time_ms: u64,
    /// Base sale price.
    pub price: u64,
    /// Price to unlock the menu item (0 = starter menu).
    #[serde(default)]
    pub unlock_cost: u64,
}

impl Recipe {
    /// Whether `sequence` is exactly this recipe's ingredient list.
    pub fn is_exactly(&self, sequence: &[IngredientId]) -> bool {
        self.ingredients.as_slice() == sequence
    }

    /// Whether `sequence` is a strict, order-preserving prefix of this
    /// recipe (shorter than the recipe and equal element-wise).
    pub fn extends(&self, sequence: &[IngredientId]) -> bool {
        sequence.len() < self.ingredients.len() && self.ingredients.starts_with(sequence)
    }
}

/// A category of customer with its own patience and tipping behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Catalog key.
    pub id: ArchetypeId,
    /// Display name.
    pub name: String,
    /// How long the customer waits before walking out.
    pub patience_ms: u64,
    /// Multiplier on the dish price (1.0 = no tip).
    pub tip_multiplier: f64,
    /// Relative likelihood of this archetype arriving.
    pub spawn_weight: u32,
    /// Menus this archetype is willing to order; `None` means any.
    #[serde(default)]
    pub allowed_menus: Option<Vec<MenuId>>,
}

// ---------------------------------------------------------------------------
// RecipeCatalog
// ---------------------------------------------------------------------------

/// The full static game table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCatalog {
    /// Every known ingredient.
    pub ingredients: Vec<Ingredient>,
    /// Every recipe, in declaration order.
    pub recipes: Vec<Recipe>,
    /// Every customer archetype, in declaration order.
    pub archetypes: Vec<Archetype>,
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RecipeCatalog {
    /// Look up a recipe by menu key.
    pub fn recipe(&self, id: &MenuId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    /// All recipes in declaration order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Look up an ingredient by key.
    pub fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| &i.id == id)
    }

    /// Whether the ingredient key is known.
    pub fn has_ingredient(&self, id: &IngredientId) -> bool {
        self.ingredient(id).is_some()
    }

    /// Look up an archetype by key.
    pub fn archetype(&self, id: &ArchetypeId) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| &a.id == id)
    }

    /// All archetypes in declaration order.
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Catalog price of a menu item.
    pub fn price_of(&self, id: &MenuId) -> Option<u64> {
        self.recipe(id).map(|r| r.price)
    }

    /// Length of the longest recipe. A filling pot never holds more
    /// ingredients than this.
    pub fn longest_recipe_len(&self) -> usize {
        self.recipes
            .iter()
            .map(|r| r.ingredients.len())
            .max()
            .unwrap_or(0)
    }

    /// Sum of all archetype spawn weights.
    pub fn total_spawn_weight(&self) -> u64 {
        self.archetypes
            .iter()
            .map(|a| u64::from(a.spawn_weight))
            .fold(0_u64, u64::saturating_add)
    }

    /// Check the catalog for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.recipes.is_empty() {
            return Err(CatalogError::NoRecipes);
        }

        let mut seen_ingredients = BTreeSet::new();
        for ingredient in &self.ingredients {
            if !seen_ingredients.insert(&ingredient.id) {
                return Err(CatalogError::DuplicateIngredient(ingredient.id.clone()));
            }
        }

        let mut seen_recipes = BTreeSet::new();
        for recipe in &self.recipes {
            if !seen_recipes.insert(&recipe.id) {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
            if recipe.ingredients.is_empty() {
                return Err(CatalogError::EmptyRecipe(recipe.id.clone()));
            }
            if recipe.cook_time_ms == 0 {
                return Err(CatalogError::ZeroCookTime(recipe.id.clone()));
            }
            if let Some(unknown) = recipe
                .ingredients
                .iter()
                .find(|i| !seen_ingredients.contains(i))
            {
                return Err(CatalogError::UnknownIngredient {
                    recipe: recipe.id.clone(),
                    ingredient: unknown.clone(),
                });
            }
        }

        let mut seen_archetypes = BTreeSet::new();
        for archetype in &self.archetypes {
            if !seen_archetypes.insert(&archetype.id) {
                return Err(CatalogError::DuplicateArchetype(archetype.id.clone()));
            }
            if archetype.patience_ms == 0 {
                return Err(CatalogError::InvalidArchetype {
                    archetype: archetype.id.clone(),
                    reason: "patience_ms must be at least 1".to_owned(),
                });
            }
            if !archetype.tip_multiplier.is_finite() || archetype.tip_multiplier < 0.0 {
                return Err(CatalogError::InvalidArchetype {
                    archetype: archetype.id.clone(),
                    reason: format!(
                        "tip_multiplier must be a non-negative number, got {}",
                        archetype.tip_multiplier
                    ),
                });
            }
            if let Some(menu) = archetype
                .allowed_menus
                .iter()
                .flatten()
                .find(|m| !seen_recipes.contains(m))
            {
                return Err(CatalogError::UnknownAllowedMenu {
                    archetype: archetype.id.clone(),
                    menu: menu.clone(),
                });
            }
        }

        if self.total_spawn_weight() == 0 {
            return Err(CatalogError::ZeroSpawnWeight);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn seq(items: &[&str]) -> Vec<IngredientId> {
        items.iter().map(|i| IngredientId::from(*i)).collect()
    }

    #[test]
    fn standard_catalog_is_valid() {
        assert!(RecipeCatalog::standard().validate().is_ok());
    }

    #[test]
    fn recipes_keep_declaration_order() {
        let catalog = RecipeCatalog::standard();
        let order: Vec<&str> = catalog.recipes().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            order,
            vec!["basic", "egg", "kimchi", "spicy", "tteok", "cheese", "seafood", "special"]
        );
    }

    #[test]
    fn exact_and_prefix_checks() {
        let catalog = RecipeCatalog::standard();
        let basic = catalog.recipe(&MenuId::from("basic")).unwrap();
        assert!(basic.is_exactly(&seq(&["water", "noodle", "soup"])));
        assert!(!basic.is_exactly(&seq(&["water", "soup", "noodle"])));
        assert!(basic.extends(&seq(&["water", "noodle"])));
        // Equal length is not a strict prefix.
        assert!(!basic.extends(&seq(&["water", "noodle", "soup"])));
        assert!(!basic.extends(&seq(&["noodle"])));
    }

    #[test]
    fn longest_recipe_is_special() {
        assert_eq!(RecipeCatalog::standard().longest_recipe_len(), 6);
    }

    #[test]
    fn rejects_unknown_ingredient() {
        let mut catalog = RecipeCatalog::standard();
        if let Some(recipe) = catalog.recipes.first_mut() {
            recipe.ingredients.push(IngredientId::from("pineapple"));
        }
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownIngredient { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_recipe() {
        let mut catalog = RecipeCatalog::standard();
        let first = catalog.recipes[0].clone();
        catalog.recipes.push(first);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateRecipe(_))
        ));
    }

    #[test]
    fn rejects_zero_spawn_weight() {
        let mut catalog = RecipeCatalog::standard();
        for archetype in &mut catalog.archetypes {
            archetype.spawn_weight = 0;
        }
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::ZeroSpawnWeight)
        ));
    }

    #[test]
    fn rejects_unknown_allowed_menu() {
        let mut catalog = RecipeCatalog::standard();
        if let Some(archetype) = catalog.archetypes.first_mut() {
            archetype.allowed_menus = Some(vec![MenuId::from("pho")]);
        }
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownAllowedMenu { .. })
        ));
    }

    #[test]
    fn parses_from_yaml() {
        let yaml = r"
ingredients:
  - { id: water, name: Water }
  - { id: noodle, name: Noodle }
recipes:
  - id: plain
    name: Plain Noodles
    ingredients: [water, noodle]
    cook_time_ms: 1000
    price: 1000
archetypes:
  - id: normal
    name: Regular
    patience_ms: 20000
    tip_multiplier: 1.0
    spawn_weight: 1
";
        let catalog: RecipeCatalog = serde_yml::from_str(yaml).unwrap();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.recipes().len(), 1);
        assert_eq!(catalog.recipes()[0].unlock_cost, 0);
        assert!(catalog.archetypes()[0].allowed_menus.is_none());
    }
}
