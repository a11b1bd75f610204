//! Strongly-typed identifiers for catalog entries, customers, and sessions.
//!
//! Catalog keys (ingredients, menus, archetypes) are human-readable strings
//! taken from the catalog definition, so they wrap [`String`]. Customers get
//! a sequential number scoped to the seating manager that spawned them, and
//! each play session gets a time-ordered UUID v7.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Milliseconds on the game's monotonic time axis.
pub type Millis = u64;

/// Generates a newtype wrapper around a catalog key [`String`].
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create a key from anything string-like.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

define_key! {
    /// Key of an ingredient the cook can drop into a pot (e.g. `water`).
    IngredientId
}

define_key! {
    /// Key of a menu item, which is also the key of its recipe (e.g. `basic`).
    MenuId
}

define_key! {
    /// Key of a customer archetype (e.g. `rush`).
    ArchetypeId
}

/// Sequential customer number, unique within one seating manager's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CustomerId(pub u64);

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for one play session (start to game over or menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_serialize_as_plain_strings() {
        let menu = MenuId::new("basic");
        let json = serde_json::to_string(&menu).ok();
        assert_eq!(json.as_deref(), Some("\"basic\""));

        let restored: Result<MenuId, _> = serde_json::from_str("\"kimchi\"");
        assert_eq!(restored.ok(), Some(MenuId::from("kimchi")));
    }

    #[test]
    fn customer_id_display() {
        assert_eq!(CustomerId(7).to_string(), "#7");
    }

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }
}
