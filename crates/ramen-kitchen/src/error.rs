//! Error types for the cooking station.
//!
//! Every variant is a recoverable, player-facing rejection. None of them
//! leave a pot in an undefined state: the station is either untouched or,
//! for [`CookError::WrongIngredient`], the pot has been reset to empty.

use ramen_types::{IngredientId, MenuId, PotState};

/// Reasons a cooking station operation is rejected.
#[derive(Debug, thiserror::Error)]
pub enum CookError {
    /// The pot index is outside the station.
    #[error("no pot at index {0}")]
    NoSuchPot(usize),

    /// An ingredient or confirm was issued with no pot selected.
    #[error("select a pot first")]
    NoPotSelected,

    /// The selected pot is cooking or done and takes no more ingredients.
    #[error("pot {pot} is {state} and cannot take ingredients")]
    PotBusy {
        /// The selected pot.
        pot: usize,
        /// Its current state.
        state: PotState,
    },

    /// The ingredient key is not in the catalog.
    #[error("unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),

    /// The ingredient sequence matches no recipe; the pot was emptied.
    #[error("wrong ingredient order in pot {pot}: {contents:?}")]
    WrongIngredient {
        /// The pot that was reset.
        pot: usize,
        /// What the pot held before the reset, including the bad ingredient.
        contents: Vec<IngredientId>,
    },

    /// Confirm was issued on a pot that is not filling.
    #[error("pot {pot} is {state}, not filling")]
    NotFilling {
        /// The selected pot.
        pot: usize,
        /// Its current state.
        state: PotState,
    },

    /// Confirm named a recipe the catalog does not define.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(MenuId),

    /// Confirm named a recipe with a different number of ingredients.
    #[error("{menu} needs {expected} ingredients, pot holds {actual}")]
    IngredientCountMismatch {
        /// The recipe the cook tried to commit to.
        menu: MenuId,
        /// Ingredients the recipe needs.
        expected: usize,
        /// Ingredients in the pot.
        actual: usize,
    },

    /// Confirm named a recipe whose ingredients differ from the pot's.
    #[error("pot contents do not match {0}")]
    IngredientMismatch(MenuId),

    /// Serve was issued on a pot that has not finished cooking.
    #[error("pot {pot} is {state}, not done")]
    NotDone {
        /// The pot.
        pot: usize,
        /// Its current state.
        state: PotState,
    },
}
