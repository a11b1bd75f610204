//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the
//! autopilot run so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ramen_core::config::ConfigError,
    },

    /// The game could not be built.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: ramen_core::error::GameError,
    },

    /// A command to the game loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: ramen_core::runner::RunnerError,
    },

    /// The game loop task panicked or was cancelled.
    #[error("game loop task failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },

    /// A command-line argument was malformed.
    #[error("invalid arguments: {message}")]
    Args {
        /// Description of the problem.
        message: String,
    },
}
