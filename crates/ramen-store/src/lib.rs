//! Persistence of the player's save record.
//!
//! The game treats storage as a collaborator behind the [`SaveStore`]
//! trait: a JSON file for real runs and an in-memory store for tests.
//!
//! # Modules
//!
//! - [`error`] -- [`StoreError`]
//! - [`store`] -- [`SaveStore`], [`JsonFileStore`], [`MemoryStore`]

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{JsonFileStore, MemoryStore, SaveStore};
