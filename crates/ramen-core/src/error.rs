//! Error types for the game orchestrator.

use ramen_catalog::UnlockError;
use ramen_kitchen::CookError;
use ramen_seating::SeatingError;
use ramen_types::{GameState, MenuId};

use crate::config::ConfigError;

/// Reasons a game operation is rejected.
///
/// All of these are recoverable: the game is left as it was before the
/// call (or, for a wrong ingredient, with that pot reset).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The action needs a running (unpaused) session.
    #[error("game is {state}, not playing")]
    NotPlaying {
        /// Current state.
        state: GameState,
    },

    /// Resume was requested while not paused.
    #[error("game is {state}, not paused")]
    NotPaused {
        /// Current state.
        state: GameState,
    },

    /// A session is already running.
    #[error("a session is already {state}")]
    SessionInProgress {
        /// Current state.
        state: GameState,
    },

    /// The dish is ready but nobody seated ordered it.
    #[error("no waiting customer ordered {0}")]
    NoCustomerForMenu(MenuId),

    /// A cooking station rejection.
    #[error(transparent)]
    Cook(#[from] CookError),

    /// A seating manager rejection.
    #[error(transparent)]
    Seating(#[from] SeatingError),

    /// A menu unlock rejection.
    #[error(transparent)]
    Unlock(#[from] UnlockError),

    /// The configuration the game was built from is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
