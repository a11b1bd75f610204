//! Recipe, ingredient, and customer archetype catalog for the ramen stall.
//!
//! The catalog is static game data: the cooking station resolves ingredient
//! sequences against its recipes, and the seating manager draws customers
//! from its archetypes. Neither mutates it.
//!
//! # Modules
//!
//! - [`catalog`] -- [`RecipeCatalog`] with lookups and validation
//! - [`error`] -- [`CatalogError`] and [`UnlockError`]
//! - [`menu`] -- [`MenuBook`], the player's unlocked menu set
//! - [`standard`] -- The built-in table shipped with the game

pub mod catalog;
pub mod error;
pub mod menu;
pub mod standard;

pub use catalog::{Archetype, Ingredient, Recipe, RecipeCatalog};
pub use error::{CatalogError, UnlockError};
pub use menu::MenuBook;
