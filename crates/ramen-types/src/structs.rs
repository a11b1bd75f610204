//! Core entity structs shared between the components and the presentation
//! layer: pots, customers, rewards, session counters, and the save record.
//!
//! These are plain data. The state machines that mutate them live in
//! `ramen-kitchen` (pots), `ramen-seating` (customers), and `ramen-core`
//! (session counters and the save record).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GameState, PotState};
use crate::ids::{ArchetypeId, CustomerId, IngredientId, MenuId, Millis, SessionId};

// ---------------------------------------------------------------------------
// Pot
// ---------------------------------------------------------------------------

/// One cooking slot on the station.
///
/// While `Filling`, `ingredients` is a prefix of at least one catalog
/// recipe. Once `target` is set, `ingredients` equals that recipe's full
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Pot {
    /// Position of the pot on the station (0-based).
    pub index: usize,
    /// Current lifecycle state.
    pub state: PotState,
    /// Ingredients added so far, in order.
    pub ingredients: Vec<IngredientId>,
    /// Recipe being cooked, once committed.
    pub target: Option<MenuId>,
    /// When the cook timer started.
    pub cook_started_at: Option<Millis>,
    /// Required cook time for the target recipe.
    pub cook_duration_ms: u64,
    /// Cook progress in `[0, 1]`.
    pub progress: f64,
}

impl Pot {
    /// Create an empty pot at the given station index.
    pub const fn empty(index: usize) -> Self {
        Self {
            index,
            state: PotState::Empty,
            ingredients: Vec::new(),
            target: None,
            cook_started_at: None,
            cook_duration_ms: 0,
            progress: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// A customer occupying a seat and waiting for one dish.
///
/// `served` and `left` are terminal and mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Customer {
    /// Sequential identity within the session.
    pub id: CustomerId,
    /// Archetype the customer was drawn from.
    pub archetype: ArchetypeId,
    /// The dish this customer ordered.
    pub menu: MenuId,
    /// Seat index the customer occupies.
    pub seat: usize,
    /// Arrival time; shifted forward across pauses.
    pub arrived_at: Millis,
    /// Total patience before the customer walks out.
    pub patience_ms: u64,
    /// Price multiplier copied from the archetype at spawn.
    pub tip_multiplier: f64,
    /// Remaining patience fraction in `[0, 1]`; never recovers.
    pub patience_remaining: f64,
    /// Set once the customer has been handed their dish.
    pub served: bool,
    /// Set once the customer ran out of patience.
    pub left: bool,
}

impl Customer {
    /// Whether the customer is still waiting (neither served nor gone).
    pub const fn is_waiting(&self) -> bool {
        !self.served && !self.left
    }
}

/// A served customer kept around for the presentation layer's exit
/// animation. Has no effect on gameplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeavingCustomer {
    /// The served customer.
    pub customer: Customer,
    /// When the presentation layer should stop drawing the customer.
    pub clear_at: Millis,
}

// ---------------------------------------------------------------------------
// Reward
// ---------------------------------------------------------------------------

/// Money earned from one successful serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Reward {
    /// Catalog price of the dish.
    pub base_price: u64,
    /// `floor(base_price * (tip_multiplier - 1))`; negative for stingy archetypes.
    pub tip: i64,
    /// `floor(base_price * patience_remaining * speed_bonus_ratio)`.
    pub speed_bonus: u64,
    /// `floor(base_price * tip_multiplier) + speed_bonus`.
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Running counters for the current play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionState {
    /// Running currency total (lifetime balance plus this session).
    pub money: u64,
    /// Dishes served this session.
    pub served: u64,
    /// Lives remaining; one is lost per walk-out.
    pub lives: u32,
    /// Consecutive successful serves since the last walk-out.
    pub streak: u32,
    /// Best streak reached this session.
    pub best_streak: u32,
    /// Money earned this session only (used for the high score).
    pub money_earned: u64,
}

/// Final statistics of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionStats {
    /// The session these stats belong to.
    pub session_id: SessionId,
    /// Money earned during the session.
    pub money_earned: u64,
    /// Dishes served during the session.
    pub served: u64,
    /// Best streak reached during the session.
    pub best_streak: u32,
}

// ---------------------------------------------------------------------------
// Save record
// ---------------------------------------------------------------------------

/// Menus unlocked on a fresh save.
pub const DEFAULT_UNLOCKED_MENUS: [&str; 2] = ["basic", "egg"];

/// Persistent progress across sessions.
///
/// Missing fields in a stored record fall back to the defaults, so older
/// save files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct SaveRecord {
    /// Lifetime currency balance.
    pub currency: u64,
    /// Best money earned in a single session.
    pub high_score: u64,
    /// Lifetime dishes served.
    pub total_served: u64,
    /// Menus the player has unlocked, in unlock order.
    pub unlocked_menus: Vec<MenuId>,
    /// Best streak ever reached.
    pub best_streak: u32,
    /// When the record was last written.
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            currency: 0,
            high_score: 0,
            total_served: 0,
            unlocked_menus: DEFAULT_UNLOCKED_MENUS.iter().map(|m| MenuId::from(*m)).collect(),
            best_streak: 0,
            last_saved_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation views
// ---------------------------------------------------------------------------

/// A menu item as listed on the unlock board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MenuEntry {
    /// Menu key.
    pub menu: MenuId,
    /// Display name.
    pub name: String,
    /// Sale price.
    pub price: u64,
    /// Cost to unlock.
    pub unlock_cost: u64,
    /// Whether the player already owns it.
    pub unlocked: bool,
}

/// Read-only view of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// Orchestrator state.
    pub state: GameState,
    /// Session counters.
    pub session: SessionState,
    /// All pots in station order.
    pub pots: Vec<Pot>,
    /// The pot receiving ingredients, if any.
    pub selected_pot: Option<usize>,
    /// Seat array; `None` is an empty seat.
    pub seats: Vec<Option<Customer>>,
    /// Served customers still on their way out.
    pub leaving: Vec<LeavingCustomer>,
}
