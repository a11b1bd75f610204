//! The game orchestrator: session state machine, tick, scoring, and
//! pause/resume time reconciliation.
//!
//! # State machine
//!
//! ```text
//! Menu --start_game--> Playing <--pause/resume--> Paused
//!   ^                     |                          |
//!   +----go_to_menu-------+--------------------------+
//!   ^                     | (last life lost)
//!   +----go_to_menu--- GameOver --start_game--> Playing
//! ```
//!
//! # Time
//!
//! Every tick and player action reads the clock exactly once and hands
//! that `now` to both the cooking station and the seating manager. On
//! resume, every in-flight timestamp is shifted forward by the paused
//! duration, so no cook progress or patience is gained or lost.

use std::sync::Arc;

use chrono::Utc;
use ramen_catalog::{MenuBook, RecipeCatalog};
use ramen_kitchen::{CookError, CookOutcome, CookingStation};
use ramen_seating::SeatingManager;
use ramen_store::SaveStore;
use ramen_types::{
    Customer, GameEvent, GameSnapshot, GameState, IngredientId, MenuEntry, MenuId, Millis,
    PotState, Reward, SaveRecord, SessionId, SessionState, SessionStats,
};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::observer::GameObserver;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Summary of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The time the tick ran at.
    pub now: Millis,
    /// Pots that finished cooking this tick.
    pub finished_pots: Vec<usize>,
    /// Customers that sat down this tick.
    pub spawned: usize,
    /// Customers that walked out this tick.
    pub departed: usize,
    /// Whether this tick ended the session.
    pub game_over: bool,
}

/// The result of a successful serve.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeOutcome {
    /// The served customer.
    pub customer: Customer,
    /// The dish handed over.
    pub menu: MenuId,
    /// Money earned from the dish itself.
    pub reward: Reward,
    /// Streak after this serve.
    pub streak: u32,
    /// Combo bonus granted by this serve, if the streak hit a threshold
    /// multiple.
    pub combo_bonus: Option<u64>,
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Owns the cooking station, the seating manager, the session counters,
/// and the bridge to the save store.
pub struct Game {
    config: GameConfig,
    catalog: Arc<RecipeCatalog>,
    clock: Arc<dyn Clock>,
    store: Box<dyn SaveStore + Send>,
    observer: Box<dyn GameObserver>,
    state: GameState,
    save: SaveRecord,
    menus: MenuBook,
    kitchen: CookingStation,
    seating: SeatingManager,
    session: SessionState,
    session_id: SessionId,
    paused_at: Option<Millis>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("session_id", &self.session_id)
            .field("paused_at", &self.paused_at)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Build a game in the `Menu` state.
    ///
    /// The save record is loaded once here. A load failure is logged and
    /// replaced by the default record so the game stays playable.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    pub fn new(
        config: GameConfig,
        clock: Arc<dyn Clock>,
        store: Box<dyn SaveStore + Send>,
        observer: Box<dyn GameObserver>,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut save = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to load save record, starting fresh");
            SaveRecord::default()
        });
        if save.last_saved_at.is_none() {
            save.currency = save.currency.max(config.stall.starting_money);
        }

        let menus = MenuBook::new(
            config
                .stall
                .starting_menus
                .iter()
                .cloned()
                .chain(save.unlocked_menus.iter().cloned())
                .filter(|menu| config.catalog.recipe(menu).is_some()),
        );

        let catalog = Arc::new(config.catalog.clone());
        let kitchen = CookingStation::new(Arc::clone(&catalog), config.stall.pots);
        let seating = SeatingManager::new(Arc::clone(&catalog), config.seating(), config.spawn_rng());
        let session = SessionState {
            money: save.currency,
            lives: config.stall.max_lives,
            ..SessionState::default()
        };

        info!(
            currency = save.currency,
            high_score = save.high_score,
            unlocked = menus.unlocked().len(),
            "Game ready"
        );

        Ok(Self {
            config,
            catalog,
            clock,
            store,
            observer,
            state: GameState::Menu,
            save,
            menus,
            kitchen,
            seating,
            session,
            session_id: SessionId::new(),
            paused_at: None,
        })
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Reset the session and both components and begin play.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionInProgress`] while playing or paused.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.state.in_session() {
            return Err(GameError::SessionInProgress { state: self.state });
        }
        let now = self.clock.now();

        self.session = SessionState {
            money: self.save.currency,
            lives: self.config.stall.max_lives,
            ..SessionState::default()
        };
        self.session_id = SessionId::new();
        self.paused_at = None;
        self.kitchen.reset_all();
        self.seating.start(now);
        self.state = GameState::Playing;

        info!(
            session = %self.session_id,
            now,
            lives = self.session.lives,
            money = self.session.money,
            "Game started"
        );
        Ok(())
    }

    /// Run one tick. Does nothing unless the game is playing.
    ///
    /// Order within a tick: advance pots, advance seats, react to
    /// departures (one life each; the last one ends the game), announce
    /// arrivals, then emit the per-tick update.
    pub fn tick(&mut self) -> Option<TickSummary> {
        if self.state != GameState::Playing {
            return None;
        }
        let now = self.clock.now();

        let finished_pots = self.kitchen.advance(now);
        let report = self.seating.advance(now, self.menus.unlocked());
        let mut summary = TickSummary {
            now,
            finished_pots,
            spawned: report.spawned.len(),
            departed: report.departed.len(),
            game_over: false,
        };

        for customer in report.departed {
            self.session.lives = self.session.lives.saturating_sub(1);
            self.session.streak = 0;
            let lives = self.session.lives;
            self.emit(&GameEvent::CustomerDeparted { customer });
            self.emit(&GameEvent::LifeLost { lives });

            if lives == 0 {
                self.end_game();
                summary.game_over = true;
                return Some(summary);
            }
        }

        for customer in report.spawned {
            self.emit(&GameEvent::CustomerSpawned { customer });
        }

        let session = self.session;
        self.emit(&GameEvent::Tick { now, session });
        Some(summary)
    }

    /// Freeze the game. Ticks stop until [`Self::resume`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] unless playing.
    pub fn pause(&mut self) -> Result<(), GameError> {
        self.require_playing()?;
        let now = self.clock.now();
        self.paused_at = Some(now);
        self.state = GameState::Paused;
        info!(now, "Game paused");
        Ok(())
    }

    /// Continue after a pause, shifting every in-flight timestamp by the
    /// paused duration. Returns that duration.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPaused`] unless paused.
    pub fn resume(&mut self) -> Result<Millis, GameError> {
        if self.state != GameState::Paused {
            return Err(GameError::NotPaused { state: self.state });
        }
        let now = self.clock.now();
        let shift = self
            .paused_at
            .take()
            .map_or(0, |paused_at| now.saturating_sub(paused_at));

        self.kitchen.shift_timers(shift);
        self.seating.shift_timers(shift);
        self.state = GameState::Playing;
        info!(now, shift_ms = shift, "Game resumed");
        Ok(shift)
    }

    /// Leave the current session for the title screen. A running or
    /// paused session is finalised and persisted first.
    pub fn go_to_menu(&mut self) {
        if self.state.in_session() {
            self.finish_session();
            info!(session = %self.session_id, "Returned to menu");
        }
        self.paused_at = None;
        self.state = GameState::Menu;
    }

    // -----------------------------------------------------------------------
    // Player actions
    // -----------------------------------------------------------------------

    /// Select the pot that receives ingredients.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] outside a session, or
    /// [`CookError::NoSuchPot`] for a bad index.
    pub fn select_pot(&mut self, index: usize) -> Result<(), GameError> {
        if !self.state.in_session() {
            return Err(GameError::NotPlaying { state: self.state });
        }
        self.kitchen.select_pot(index)?;
        Ok(())
    }

    /// Clear the pot selection.
    pub const fn deselect_pot(&mut self) {
        self.kitchen.deselect_pot();
    }

    /// Add an ingredient to the selected pot.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] unless playing, or the
    /// [`CookError`] describing the rejection.
    pub fn add_ingredient(&mut self, ingredient: &IngredientId) -> Result<CookOutcome, GameError> {
        self.require_playing()?;
        let now = self.clock.now();
        Ok(self.kitchen.add_ingredient(ingredient, now)?)
    }

    /// Commit the selected pot to `menu`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] unless playing, or the
    /// [`CookError`] describing the rejection.
    pub fn confirm_cook(&mut self, menu: &MenuId) -> Result<CookOutcome, GameError> {
        self.require_playing()?;
        let now = self.clock.now();
        Ok(self.kitchen.confirm_cook(menu, now)?)
    }

    /// Hand the dish in `pot` to the waiting customer who ordered it and
    /// is closest to walking out.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotPlaying`] unless playing.
    /// - [`CookError::NoSuchPot`] or [`CookError::NotDone`] for the pot.
    /// - [`GameError::NoCustomerForMenu`] if nobody wants the dish.
    pub fn try_serve(&mut self, pot: usize) -> Result<ServeOutcome, GameError> {
        self.require_playing()?;
        let menu = {
            let current = self.kitchen.pot(pot).ok_or(CookError::NoSuchPot(pot))?;
            if current.state != PotState::Done {
                return Err(CookError::NotDone {
                    pot,
                    state: current.state,
                }
                .into());
            }
            self.kitchen
                .ready_dish(pot)
                .cloned()
                .ok_or(CookError::NotDone {
                    pot,
                    state: current.state,
                })?
        };
        let now = self.clock.now();
        let customer_id = self
            .seating
            .find_customer_for_menu(&menu, now)
            .map(|c| c.id)
            .ok_or_else(|| GameError::NoCustomerForMenu(menu.clone()))?;

        let receipt = self.seating.complete_service(customer_id, now)?;
        self.kitchen.serve(pot)?;

        let reward = receipt.reward;
        self.credit(reward.total);
        self.session.served = self.session.served.saturating_add(1);
        self.session.streak = self.session.streak.saturating_add(1);
        self.session.best_streak = self.session.best_streak.max(self.session.streak);
        let streak = self.session.streak;

        self.emit(&GameEvent::ServeSucceeded {
            customer: receipt.customer.clone(),
            menu: menu.clone(),
            reward,
            streak,
        });

        let combo_bonus = self.combo_bonus_for(streak);
        if let Some(bonus) = combo_bonus {
            self.credit(bonus);
            info!(streak, bonus, "Combo bonus granted");
            self.emit(&GameEvent::ComboBonus { streak, bonus });
        }

        Ok(ServeOutcome {
            customer: receipt.customer,
            menu,
            reward,
            streak,
            combo_bonus,
        })
    }

    /// Buy a locked menu with the current money and persist the result.
    /// Allowed in any state. Returns the cost paid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Unlock`] for unknown, owned, or unaffordable
    /// menus.
    pub fn unlock_menu(&mut self, menu: &MenuId) -> Result<u64, GameError> {
        let cost = self.menus.unlock(menu, self.session.money, &self.catalog)?;
        self.session.money = self.session.money.saturating_sub(cost);
        self.save.currency = self.session.money;
        self.save.unlocked_menus = self.menus.unlocked().to_vec();
        self.persist();
        Ok(cost)
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    /// Current orchestrator state.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Whether ticks are running.
    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    /// Session counters (the last finished session's when not playing).
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Identity of the current (or last) session.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Money available right now.
    pub const fn money(&self) -> u64 {
        self.session.money
    }

    /// The persistent record as of the last save.
    pub const fn save_record(&self) -> &SaveRecord {
        &self.save
    }

    /// The catalog the game plays with.
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Menus currently unlocked.
    pub fn unlocked_menus(&self) -> &[MenuId] {
        self.menus.unlocked()
    }

    /// Every recipe with price, unlock cost, and ownership.
    pub fn menu_board(&self) -> Vec<MenuEntry> {
        self.menus.board(&self.catalog)
    }

    /// Everything the presentation layer draws.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            session: self.session,
            pots: self.kitchen.pots().to_vec(),
            selected_pot: self.kitchen.selected(),
            seats: self.seating.seats().to_vec(),
            leaving: self.seating.leaving().to_vec(),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn require_playing(&self) -> Result<(), GameError> {
        if self.state == GameState::Playing {
            Ok(())
        } else {
            Err(GameError::NotPlaying { state: self.state })
        }
    }

    fn emit(&mut self, event: &GameEvent) {
        self.observer.notify(event);
    }

    fn credit(&mut self, amount: u64) {
        self.session.money = self.session.money.saturating_add(amount);
        self.session.money_earned = self.session.money_earned.saturating_add(amount);
    }

    /// The bonus owed when `streak` is a positive multiple of the threshold.
    fn combo_bonus_for(&self, streak: u32) -> Option<u64> {
        let threshold = self.config.scoring.combo_threshold;
        (streak > 0 && threshold > 0 && streak.checked_rem(threshold) == Some(0))
            .then_some(self.config.scoring.combo_bonus)
    }

    /// Last life lost: finalise, persist, announce.
    fn end_game(&mut self) {
        let stats = self.finish_session();
        self.state = GameState::GameOver;
        self.emit(&GameEvent::GameOver { stats });
    }

    /// Stop both components and fold the session into the save record.
    fn finish_session(&mut self) -> SessionStats {
        self.seating.clear_all();
        self.kitchen.reset_all();
        self.paused_at = None;

        self.save.currency = self.session.money;
        self.save.total_served = self.save.total_served.saturating_add(self.session.served);
        self.save.unlocked_menus = self.menus.unlocked().to_vec();
        self.save.high_score = self.save.high_score.max(self.session.money_earned);
        self.save.best_streak = self.save.best_streak.max(self.session.best_streak);
        self.persist();

        let stats = SessionStats {
            session_id: self.session_id,
            money_earned: self.session.money_earned,
            served: self.session.served,
            best_streak: self.session.best_streak,
        };
        info!(
            session = %stats.session_id,
            money_earned = stats.money_earned,
            served = stats.served,
            best_streak = stats.best_streak,
            "Session finished"
        );
        stats
    }

    /// Write the save record; failures are logged and play continues.
    fn persist(&mut self) {
        self.save.last_saved_at = Some(Utc::now());
        if let Err(err) = self.store.save(&self.save) {
            warn!(error = %err, "Failed to persist save record");
        }
    }
}
