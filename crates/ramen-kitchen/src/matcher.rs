//! Ingredient sequence matching against the recipe catalog.
//!
//! A recipe is an *exact* match when the pot's sequence equals it, and a
//! *reachable* (prefix) match when the sequence is a strict, order-preserving
//! prefix of it. Order matters; there is no subset or reordered matching.
//! Both lists come out in catalog declaration order.

use ramen_catalog::RecipeCatalog;
use ramen_types::{IngredientId, MenuId};

/// All recipes matching an ingredient sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    /// Recipes equal to the sequence.
    pub exact: Vec<MenuId>,
    /// Recipes the sequence is a strict prefix of.
    pub reachable: Vec<MenuId>,
}

/// What the station should do with a pot after an ingredient was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No recipe starts with this sequence: reset the pot.
    WrongIngredient,
    /// Exactly one outcome is possible: start cooking this recipe.
    AutoCook(MenuId),
    /// Some recipes are complete and longer ones are still reachable.
    Ambiguous {
        /// Recipes reachable by adding more ingredients.
        reachable: Vec<MenuId>,
        /// Recipes that can be committed right now via confirm.
        confirmable: Vec<MenuId>,
    },
    /// Only longer recipes match: keep filling.
    Partial {
        /// Recipes reachable by adding more ingredients.
        reachable: Vec<MenuId>,
    },
}

/// Collect the exact and reachable recipes for `sequence`.
pub fn match_sequence(catalog: &RecipeCatalog, sequence: &[IngredientId]) -> MatchSet {
    let mut set = MatchSet::default();
    for recipe in catalog.recipes() {
        if recipe.is_exactly(sequence) {
            set.exact.push(recipe.id.clone());
        } else if recipe.extends(sequence) {
            set.reachable.push(recipe.id.clone());
        }
    }
    set
}

impl MatchSet {
    /// Apply the resolution policy.
    ///
    /// With several exact matches and nothing longer reachable, the first
    /// declared recipe wins.
    pub fn resolve(self) -> Resolution {
        let Self { exact, reachable } = self;
        match (exact.is_empty(), reachable.is_empty()) {
            (true, true) => Resolution::WrongIngredient,
            (false, true) => exact
                .into_iter()
                .next()
                .map_or(Resolution::WrongIngredient, Resolution::AutoCook),
            (false, false) => Resolution::Ambiguous {
                reachable,
                confirmable: exact,
            },
            (true, false) => Resolution::Partial { reachable },
        }
    }
}

/// Resolve `sequence` against the catalog in one step.
pub fn resolve(catalog: &RecipeCatalog, sequence: &[IngredientId]) -> Resolution {
    match_sequence(catalog, sequence).resolve()
}

#[cfg(test)]
mod tests {
    use ramen_catalog::{Archetype, Ingredient, Recipe};
    use ramen_types::ArchetypeId;

    use super::*;

    fn seq(items: &[&str]) -> Vec<IngredientId> {
        items.iter().map(|i| IngredientId::from(*i)).collect()
    }

    fn menus(items: &[&str]) -> Vec<MenuId> {
        items.iter().map(|m| MenuId::from(*m)).collect()
    }

    fn recipe(id: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: MenuId::from(id),
            name: id.to_owned(),
            ingredients: seq(ingredients),
            cook_time_ms: 1000,
            price: 1000,
            unlock_cost: 0,
        }
    }

    /// A catalog where `basic` has no longer sibling.
    fn basic_only() -> RecipeCatalog {
        RecipeCatalog {
            ingredients: ["water", "noodle", "soup", "egg", "kimchi"]
                .iter()
                .map(|i| Ingredient {
                    id: IngredientId::from(*i),
                    name: (*i).to_owned(),
                })
                .collect(),
            recipes: vec![recipe("basic", &["water", "noodle", "soup"])],
            archetypes: vec![Archetype {
                id: ArchetypeId::from("normal"),
                name: "normal".to_owned(),
                patience_ms: 30_000,
                tip_multiplier: 1.0,
                spawn_weight: 1,
                allowed_menus: None,
            }],
        }
    }

    #[test]
    fn full_sequence_without_longer_sibling_auto_cooks() {
        let catalog = basic_only();
        assert_eq!(
            resolve(&catalog, &seq(&["water", "noodle", "soup"])),
            Resolution::AutoCook(MenuId::from("basic"))
        );
    }

    #[test]
    fn full_sequence_with_longer_sibling_is_ambiguous() {
        let mut catalog = basic_only();
        catalog
            .recipes
            .push(recipe("egg", &["water", "noodle", "soup", "egg"]));
        assert_eq!(
            resolve(&catalog, &seq(&["water", "noodle", "soup"])),
            Resolution::Ambiguous {
                reachable: menus(&["egg"]),
                confirmable: menus(&["basic"]),
            }
        );
    }

    #[test]
    fn prefix_only_keeps_filling() {
        let catalog = RecipeCatalog::standard();
        let resolution = resolve(&catalog, &seq(&["water"]));
        assert_eq!(
            resolution,
            Resolution::Partial {
                reachable: menus(&[
                    "basic", "egg", "kimchi", "spicy", "tteok", "cheese", "seafood", "special"
                ]),
            }
        );
    }

    #[test]
    fn unmatched_sequence_is_wrong() {
        let catalog = RecipeCatalog::standard();
        assert_eq!(
            resolve(&catalog, &seq(&["water", "kimchi"])),
            Resolution::WrongIngredient
        );
        assert_eq!(resolve(&catalog, &seq(&["noodle"])), Resolution::WrongIngredient);
    }

    #[test]
    fn order_matters() {
        let catalog = RecipeCatalog::standard();
        // tteok goes second in tteok ramen, not fourth.
        assert_eq!(
            resolve(&catalog, &seq(&["water", "noodle", "soup", "tteok"])),
            Resolution::WrongIngredient
        );
    }

    #[test]
    fn duplicate_exact_matches_pick_first_declared() {
        let mut catalog = basic_only();
        catalog
            .recipes
            .push(recipe("house", &["water", "noodle", "soup"]));
        assert_eq!(
            resolve(&catalog, &seq(&["water", "noodle", "soup"])),
            Resolution::AutoCook(MenuId::from("basic"))
        );
    }

    #[test]
    fn longest_standard_recipe_auto_cooks() {
        let catalog = RecipeCatalog::standard();
        assert_eq!(
            resolve(
                &catalog,
                &seq(&["water", "seafood", "noodle", "soup", "egg", "kimchi"])
            ),
            Resolution::AutoCook(MenuId::from("special"))
        );
    }
}
