//! Cooking station and recipe sequence matcher for the ramen stall.
//!
//! # Modules
//!
//! - [`error`] -- [`CookError`], every player-facing cooking rejection
//! - [`matcher`] -- Exact and prefix matching against the catalog
//! - [`station`] -- [`CookingStation`], the pot state machines

pub mod error;
pub mod matcher;
pub mod station;

pub use error::CookError;
pub use matcher::{MatchSet, Resolution, match_sequence};
pub use station::{CookOutcome, CookingStation};
