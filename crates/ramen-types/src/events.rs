//! Push notifications emitted by the game orchestrator.
//!
//! Each occurrence is emitted exactly once, in the order it happened
//! within a tick or player action.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::MenuId;
use crate::structs::{Customer, Reward, SessionState, SessionStats};

/// A notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameEvent {
    /// A customer sat down and placed an order.
    CustomerSpawned {
        /// The new customer.
        customer: Customer,
    },
    /// A customer ran out of patience and walked out.
    CustomerDeparted {
        /// The departed customer (marked `left`).
        customer: Customer,
    },
    /// A dish was handed to the right customer.
    ServeSucceeded {
        /// The served customer.
        customer: Customer,
        /// The dish that was served.
        menu: MenuId,
        /// Money earned from the serve.
        reward: Reward,
        /// Streak after this serve.
        streak: u32,
    },
    /// The streak hit a multiple of the combo threshold.
    ComboBonus {
        /// Streak that triggered the bonus.
        streak: u32,
        /// Flat bonus granted.
        bonus: u64,
    },
    /// A life was lost to a walk-out.
    LifeLost {
        /// Lives remaining after the loss.
        lives: u32,
    },
    /// Generic per-tick update.
    Tick {
        /// Game time of the tick.
        now: u64,
        /// Session counters after the tick.
        session: SessionState,
    },
    /// The last life was lost.
    GameOver {
        /// Final session statistics.
        stats: SessionStats,
    },
}

impl GameEvent {
    /// Short label used in structured logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CustomerSpawned { .. } => "customer_spawned",
            Self::CustomerDeparted { .. } => "customer_departed",
            Self::ServeSucceeded { .. } => "serve_succeeded",
            Self::ComboBonus { .. } => "combo_bonus",
            Self::LifeLost { .. } => "life_lost",
            Self::Tick { .. } => "tick",
            Self::GameOver { .. } => "game_over",
        }
    }
}
