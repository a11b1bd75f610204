//! Game orchestrator, tick loop, and configuration for the ramen stall.
//!
//! This crate ties the cooking station and the seating manager to a
//! real-time loop. It owns the session state machine, scoring (streaks,
//! combos, lives), pause/resume time reconciliation, and the bridge to the
//! save store.
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait with wall-clock and manual time sources
//! - [`config`] -- Configuration loading from `ramen-config.yaml` into
//!   strongly-typed structs
//! - [`error`] -- [`GameError`]
//! - [`game`] -- [`Game`], the orchestrator
//! - [`observer`] -- [`GameObserver`] trait and its implementations
//! - [`runner`] -- The async tick loop and its [`GameHandle`] client
//!
//! [`Clock`]: clock::Clock
//! [`GameError`]: error::GameError
//! [`Game`]: game::Game
//! [`GameObserver`]: observer::GameObserver
//! [`GameHandle`]: runner::GameHandle

pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod observer;
pub mod runner;
