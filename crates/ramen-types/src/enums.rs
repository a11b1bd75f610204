//! Enumeration types for pot and game lifecycles.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Pot lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle state of a single pot.
///
/// `Empty -> Filling -> Cooking -> Done`, and back to `Empty` on serve,
/// on a wrong ingredient, or on a full reset. A wrong ingredient is
/// reported as an error outcome rather than a lingering state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PotState {
    /// Nothing in the pot.
    Empty,
    /// Ingredients are being added; no recipe committed yet.
    Filling,
    /// A recipe is committed and the cook timer is running.
    Cooking,
    /// The dish is ready to serve.
    Done,
}

impl PotState {
    /// Whether ingredients can still be added in this state.
    pub const fn accepts_ingredients(self) -> bool {
        matches!(self, Self::Empty | Self::Filling)
    }
}

impl core::fmt::Display for PotState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Filling => "filling",
            Self::Cooking => "cooking",
            Self::Done => "done",
        })
    }
}

// ---------------------------------------------------------------------------
// Game lifecycle
// ---------------------------------------------------------------------------

/// Top-level state of the game orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameState {
    /// Title screen: no session running.
    Menu,
    /// A session is running and the tick loop is armed.
    Playing,
    /// A session is frozen; in-flight timers are shifted on resume.
    Paused,
    /// Lives ran out; the session has been finalized.
    GameOver,
}

impl GameState {
    /// Whether a session is in progress (playing or paused).
    pub const fn in_session(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

impl core::fmt::Display for GameState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Menu => "menu",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::GameOver => "game_over",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_and_filling_accept_ingredients() {
        assert!(PotState::Empty.accepts_ingredients());
        assert!(PotState::Filling.accepts_ingredients());
        assert!(!PotState::Cooking.accepts_ingredients());
        assert!(!PotState::Done.accepts_ingredients());
    }

    #[test]
    fn game_state_serializes_snake_case() {
        let json = serde_json::to_string(&GameState::GameOver).ok();
        assert_eq!(json.as_deref(), Some("\"game_over\""));
    }
}
