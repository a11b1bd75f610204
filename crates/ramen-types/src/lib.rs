//! Shared type definitions for the ramen stall simulation.
//!
//! This crate is the single source of truth for the data exchanged between
//! the cooking station, the seating manager, the game orchestrator, and the
//! presentation layer. Types defined here flow downstream to `TypeScript`
//! via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Catalog keys, customer numbers, and session UUIDs
//! - [`enums`] -- Pot and game lifecycle states
//! - [`structs`] -- Pots, customers, rewards, session counters, save record
//! - [`events`] -- Notifications pushed to the presentation layer

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{GameState, PotState};
pub use events::GameEvent;
pub use ids::{ArchetypeId, CustomerId, IngredientId, MenuId, Millis, SessionId};
pub use structs::{
    Customer, DEFAULT_UNLOCKED_MENUS, GameSnapshot, LeavingCustomer, MenuEntry, Pot, Reward,
    SaveRecord, SessionState, SessionStats,
};
