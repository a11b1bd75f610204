//! Error types for the `ramen-catalog` crate.

use ramen_types::{ArchetypeId, IngredientId, MenuId};

/// Reasons a catalog definition is rejected by [`RecipeCatalog::validate`].
///
/// [`RecipeCatalog::validate`]: crate::RecipeCatalog::validate
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog defines no recipes at all.
    #[error("catalog has no recipes")]
    NoRecipes,

    /// Two ingredients share a key.
    #[error("duplicate ingredient: {0}")]
    DuplicateIngredient(IngredientId),

    /// Two recipes share a key.
    #[error("duplicate recipe: {0}")]
    DuplicateRecipe(MenuId),

    /// Two archetypes share a key.
    #[error("duplicate archetype: {0}")]
    DuplicateArchetype(ArchetypeId),

    /// A recipe has an empty ingredient sequence.
    #[error("recipe {0} has no ingredients")]
    EmptyRecipe(MenuId),

    /// A recipe references an ingredient the catalog does not define.
    #[error("recipe {recipe} uses unknown ingredient {ingredient}")]
    UnknownIngredient {
        /// The offending recipe.
        recipe: MenuId,
        /// The undefined ingredient.
        ingredient: IngredientId,
    },

    /// A recipe has a cook time of zero.
    #[error("recipe {0} has a zero cook time")]
    ZeroCookTime(MenuId),

    /// An archetype allow-list names a menu the catalog does not define.
    #[error("archetype {archetype} allows unknown menu {menu}")]
    UnknownAllowedMenu {
        /// The offending archetype.
        archetype: ArchetypeId,
        /// The undefined menu.
        menu: MenuId,
    },

    /// An archetype has out-of-range tuning values.
    #[error("archetype {archetype} is invalid: {reason}")]
    InvalidArchetype {
        /// The offending archetype.
        archetype: ArchetypeId,
        /// What is wrong with it.
        reason: String,
    },

    /// No archetype can ever be drawn.
    #[error("total archetype spawn weight is zero")]
    ZeroSpawnWeight,
}

/// Reasons a menu unlock is refused.
#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    /// The menu is not in the catalog.
    #[error("unknown menu: {0}")]
    UnknownMenu(MenuId),

    /// The menu is already unlocked.
    #[error("menu {0} is already unlocked")]
    AlreadyUnlocked(MenuId),

    /// The player cannot afford the unlock cost.
    #[error("unlocking {menu} costs {cost} but only {available} is available")]
    InsufficientFunds {
        /// The requested menu.
        menu: MenuId,
        /// Catalog unlock cost.
        cost: u64,
        /// Money the player holds.
        available: u64,
    },
}
