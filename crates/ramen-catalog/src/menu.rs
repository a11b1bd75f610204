//! The player's unlocked menu set.
//!
//! Unlocked menus decide what customers may order. The book keeps unlock
//! order so that random menu draws are reproducible under a seeded source.

use ramen_types::{MenuEntry, MenuId};
use tracing::info;

use crate::catalog::{Recipe, RecipeCatalog};
use crate::error::UnlockError;

/// Ordered set of unlocked menu keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuBook {
    unlocked: Vec<MenuId>,
}

impl MenuBook {
    /// Create a book from a previously saved unlock list. Duplicates are
    /// dropped, first occurrence wins.
    pub fn new(unlocked: impl IntoIterator<Item = MenuId>) -> Self {
        let mut book = Self::default();
        for menu in unlocked {
            if !book.is_unlocked(&menu) {
                book.unlocked.push(menu);
            }
        }
        book
    }

    /// Whether the menu is unlocked.
    pub fn is_unlocked(&self, menu: &MenuId) -> bool {
        self.unlocked.contains(menu)
    }

    /// Unlocked menus in unlock order.
    pub fn unlocked(&self) -> &[MenuId] {
        &self.unlocked
    }

    /// Catalog recipes not yet unlocked, in declaration order.
    pub fn locked<'a>(&self, catalog: &'a RecipeCatalog) -> Vec<&'a Recipe> {
        catalog
            .recipes()
            .iter()
            .filter(|r| !self.is_unlocked(&r.id))
            .collect()
    }

    /// Every catalog recipe with its unlock status.
    pub fn board(&self, catalog: &RecipeCatalog) -> Vec<MenuEntry> {
        catalog
            .recipes()
            .iter()
            .map(|r| MenuEntry {
                menu: r.id.clone(),
                name: r.name.clone(),
                price: r.price,
                unlock_cost: r.unlock_cost,
                unlocked: self.is_unlocked(&r.id),
            })
            .collect()
    }

    /// Unlock a menu if the player can afford it. Returns the cost to
    /// deduct; the caller owns the money.
    ///
    /// # Errors
    ///
    /// Returns [`UnlockError`] if the menu is unknown, already unlocked, or
    /// costs more than `money`.
    pub fn unlock(
        &mut self,
        menu: &MenuId,
        money: u64,
        catalog: &RecipeCatalog,
    ) -> Result<u64, UnlockError> {
        let recipe = catalog
            .recipe(menu)
            .ok_or_else(|| UnlockError::UnknownMenu(menu.clone()))?;
        if self.is_unlocked(menu) {
            return Err(UnlockError::AlreadyUnlocked(menu.clone()));
        }
        if money < recipe.unlock_cost {
            return Err(UnlockError::InsufficientFunds {
                menu: menu.clone(),
                cost: recipe.unlock_cost,
                available: money,
            });
        }

        self.unlocked.push(menu.clone());
        info!(menu = %menu, cost = recipe.unlock_cost, "Menu unlocked");
        Ok(recipe.unlock_cost)
    }
}
