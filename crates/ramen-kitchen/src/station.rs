//! The cooking station: a fixed set of pots driven by ingredient events
//! and wall-clock time.
//!
//! Each pot runs `Empty -> Filling -> Cooking -> Done` independently. The
//! station never reads the clock itself; callers pass `now` into every
//! time-dependent operation so that one tick uses one timestamp for every
//! component.

use std::sync::Arc;

use ramen_catalog::{Recipe, RecipeCatalog};
use ramen_types::{IngredientId, MenuId, Millis, Pot, PotState};
use tracing::{debug, info};

use crate::error::CookError;
use crate::matcher::{self, Resolution};

/// Result of a successful `add_ingredient` or `confirm_cook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookOutcome {
    /// A recipe was committed and the cook timer started.
    Cooking {
        /// The pot now cooking.
        pot: usize,
        /// The committed recipe.
        menu: MenuId,
    },
    /// The pot keeps filling.
    Filling {
        /// The pot being filled.
        pot: usize,
        /// Recipes reachable by adding more ingredients.
        reachable: Vec<MenuId>,
        /// Recipes that can be committed now via confirm (empty unless the
        /// sequence is ambiguous).
        confirmable: Vec<MenuId>,
    },
}

/// Owns the pots and the current pot selection.
#[derive(Debug, Clone)]
pub struct CookingStation {
    catalog: Arc<RecipeCatalog>,
    pots: Vec<Pot>,
    selected: Option<usize>,
}

impl CookingStation {
    /// Create a station with `pot_count` empty pots.
    pub fn new(catalog: Arc<RecipeCatalog>, pot_count: usize) -> Self {
        Self {
            catalog,
            pots: (0..pot_count).map(Pot::empty).collect(),
            selected: None,
        }
    }

    /// All pots in station order.
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// One pot by index.
    pub fn pot(&self, index: usize) -> Option<&Pot> {
        self.pots.get(index)
    }

    /// Index of the pot receiving ingredients, if any.
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Make `index` the target for ingredient input. Any pot can be
    /// selected, whatever its state; selection never changes the pot.
    ///
    /// # Errors
    ///
    /// Returns [`CookError::NoSuchPot`] if the index is out of range.
    pub fn select_pot(&mut self, index: usize) -> Result<(), CookError> {
        if index >= self.pots.len() {
            return Err(CookError::NoSuchPot(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Clear the selection.
    pub const fn deselect_pot(&mut self) {
        self.selected = None;
    }

    /// Add an ingredient to the selected pot and re-evaluate its matches.
    ///
    /// # Errors
    ///
    /// - [`CookError::NoPotSelected`] if nothing is selected.
    /// - [`CookError::PotBusy`] if the pot is cooking or done.
    /// - [`CookError::UnknownIngredient`] if the key is not in the catalog.
    /// - [`CookError::WrongIngredient`] if the new sequence matches no
    ///   recipe. The pot is reset to empty before returning.
    pub fn add_ingredient(
        &mut self,
        ingredient: &IngredientId,
        now: Millis,
    ) -> Result<CookOutcome, CookError> {
        let index = self.selected.ok_or(CookError::NoPotSelected)?;
        let catalog = Arc::clone(&self.catalog);
        let pot = self
            .pots
            .get_mut(index)
            .ok_or(CookError::NoSuchPot(index))?;

        if !pot.state.accepts_ingredients() {
            return Err(CookError::PotBusy {
                pot: index,
                state: pot.state,
            });
        }
        if !catalog.has_ingredient(ingredient) {
            return Err(CookError::UnknownIngredient(ingredient.clone()));
        }

        pot.state = PotState::Filling;
        pot.ingredients.push(ingredient.clone());
        debug!(pot = index, ingredient = %ingredient, count = pot.ingredients.len(), "Ingredient added");

        match matcher::resolve(&catalog, &pot.ingredients) {
            Resolution::WrongIngredient => {
                let contents = std::mem::take(&mut pot.ingredients);
                *pot = Pot::empty(index);
                info!(pot = index, ?contents, "Wrong ingredient, pot emptied");
                Err(CookError::WrongIngredient {
                    pot: index,
                    contents,
                })
            }
            Resolution::AutoCook(menu) => {
                let recipe = catalog
                    .recipe(&menu)
                    .ok_or_else(|| CookError::UnknownRecipe(menu.clone()))?;
                start_cooking(pot, recipe, now);
                Ok(CookOutcome::Cooking { pot: index, menu })
            }
            Resolution::Ambiguous {
                reachable,
                confirmable,
            } => Ok(CookOutcome::Filling {
                pot: index,
                reachable,
                confirmable,
            }),
            Resolution::Partial { reachable } => Ok(CookOutcome::Filling {
                pot: index,
                reachable,
                confirmable: Vec::new(),
            }),
        }
    }

    /// Commit the selected, filling pot to `menu` if its ingredients are
    /// exactly that recipe's sequence.
    ///
    /// # Errors
    ///
    /// - [`CookError::NoPotSelected`] if nothing is selected.
    /// - [`CookError::NotFilling`] if the pot is not filling.
    /// - [`CookError::UnknownRecipe`] if the menu is not in the catalog.
    /// - [`CookError::IngredientCountMismatch`] or
    ///   [`CookError::IngredientMismatch`] if the sequence differs.
    pub fn confirm_cook(&mut self, menu: &MenuId, now: Millis) -> Result<CookOutcome, CookError> {
        let index = self.selected.ok_or(CookError::NoPotSelected)?;
        let catalog = Arc::clone(&self.catalog);
        let pot = self
            .pots
            .get_mut(index)
            .ok_or(CookError::NoSuchPot(index))?;

        if pot.state != PotState::Filling {
            return Err(CookError::NotFilling {
                pot: index,
                state: pot.state,
            });
        }
        let recipe = catalog
            .recipe(menu)
            .ok_or_else(|| CookError::UnknownRecipe(menu.clone()))?;
        if recipe.ingredients.len() != pot.ingredients.len() {
            return Err(CookError::IngredientCountMismatch {
                menu: menu.clone(),
                expected: recipe.ingredients.len(),
                actual: pot.ingredients.len(),
            });
        }
        if !recipe.is_exactly(&pot.ingredients) {
            return Err(CookError::IngredientMismatch(menu.clone()));
        }

        start_cooking(pot, recipe, now);
        Ok(CookOutcome::Cooking {
            pot: index,
            menu: menu.clone(),
        })
    }

    /// Advance cook timers to `now`. Returns the pots that finished during
    /// this call. Safe to call repeatedly with non-decreasing `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<usize> {
        let mut finished = Vec::new();
        for pot in &mut self.pots {
            if pot.state != PotState::Cooking {
                continue;
            }
            let started = pot.cook_started_at.unwrap_or(now);
            let elapsed = now.saturating_sub(started);
            if elapsed >= pot.cook_duration_ms {
                pot.state = PotState::Done;
                pot.progress = 1.0;
                info!(pot = pot.index, menu = ?pot.target, "Dish ready");
                finished.push(pot.index);
            } else {
                pot.progress = fraction(elapsed, pot.cook_duration_ms);
            }
        }
        finished
    }

    /// Take the finished dish out of a pot, leaving the pot empty.
    ///
    /// # Errors
    ///
    /// Returns [`CookError::NoSuchPot`] or [`CookError::NotDone`].
    pub fn serve(&mut self, index: usize) -> Result<MenuId, CookError> {
        let pot = self.pots.get_mut(index).ok_or(CookError::NoSuchPot(index))?;
        if pot.state != PotState::Done {
            return Err(CookError::NotDone {
                pot: index,
                state: pot.state,
            });
        }
        let menu = pot.target.take().ok_or(CookError::NotDone {
            pot: index,
            state: pot.state,
        })?;
        *pot = Pot::empty(index);
        Ok(menu)
    }

    /// The recipe a done pot holds, without serving it.
    pub fn ready_dish(&self, index: usize) -> Option<&MenuId> {
        self.pots
            .get(index)
            .filter(|p| p.state == PotState::Done)
            .and_then(|p| p.target.as_ref())
    }

    /// Empty every pot and clear the selection.
    pub fn reset_all(&mut self) {
        for (index, pot) in self.pots.iter_mut().enumerate() {
            *pot = Pot::empty(index);
        }
        self.selected = None;
    }

    /// Push every running cook timer forward by `delta` (pause compensation).
    pub fn shift_timers(&mut self, delta: Millis) {
        for pot in &mut self.pots {
            if pot.state == PotState::Cooking
                && let Some(started) = pot.cook_started_at.as_mut()
            {
                *started = started.saturating_add(delta);
            }
        }
    }
}

/// Commit `pot` to `recipe` and start its timer at `now`.
fn start_cooking(pot: &mut Pot, recipe: &Recipe, now: Millis) {
    pot.target = Some(recipe.id.clone());
    pot.cook_started_at = Some(now);
    pot.cook_duration_ms = recipe.cook_time_ms;
    pot.progress = 0.0;
    pot.state = PotState::Cooking;
    info!(
        pot = pot.index,
        menu = %recipe.id,
        cook_time_ms = recipe.cook_time_ms,
        "Cooking started"
    );
}

/// `elapsed / total` clamped to `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
fn fraction(elapsed: u64, total: u64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}
