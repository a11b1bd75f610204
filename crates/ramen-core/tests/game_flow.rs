//! End-to-end scenarios for the game orchestrator.
//!
//! Every test drives the game with a [`ManualClock`] and a seeded random
//! source, calling `tick()` by hand, so timings are exact.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::unreachable,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use std::sync::Arc;

use ramen_catalog::{Archetype, Ingredient, Recipe, RecipeCatalog, UnlockError};
use ramen_core::clock::ManualClock;
use ramen_core::config::GameConfig;
use ramen_core::error::GameError;
use ramen_core::game::Game;
use ramen_core::observer::ChannelObserver;
use ramen_kitchen::{CookError, CookOutcome};
use ramen_store::{MemoryStore, SaveStore, StoreError};
use ramen_types::{
    ArchetypeId, CustomerId, GameEvent, GameState, IngredientId, MenuId, PotState, SaveRecord,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

// =============================================================================
// Fixtures
// =============================================================================

fn ingredient(id: &str) -> Ingredient {
    Ingredient {
        id: IngredientId::from(id),
        name: id.to_owned(),
    }
}

fn recipe(id: &str, ingredients: &[&str], cook_time_ms: u64, price: u64, unlock_cost: u64) -> Recipe {
    Recipe {
        id: MenuId::from(id),
        name: id.to_owned(),
        ingredients: ingredients.iter().map(|i| IngredientId::from(*i)).collect(),
        cook_time_ms,
        price,
        unlock_cost,
    }
}

/// `basic` auto-cooks (nothing extends it); `spicy` takes 6000ms and is
/// locked. One archetype with a flat tip.
fn test_catalog(patience_ms: u64) -> RecipeCatalog {
    RecipeCatalog {
        ingredients: ["water", "noodle", "soup", "chili"]
            .into_iter()
            .map(ingredient)
            .collect(),
        recipes: vec![
            recipe("basic", &["water", "noodle", "soup"], 5000, 3000, 0),
            recipe("spicy", &["water", "chili", "noodle", "soup"], 6000, 4500, 5000),
        ],
        archetypes: vec![Archetype {
            id: ArchetypeId::from("regular"),
            name: "Regular".to_owned(),
            patience_ms,
            tip_multiplier: 1.0,
            spawn_weight: 1,
            allowed_menus: None,
        }],
    }
}

/// One seat, customers arriving on every tick the seat is free.
fn test_config(patience_ms: u64) -> GameConfig {
    let mut config = GameConfig::default();
    config.catalog = test_catalog(patience_ms);
    config.stall.seats = 1;
    config.stall.starting_menus = vec![MenuId::from("basic")];
    config.spawn.interval_min_ms = 0;
    config.spawn.interval_max_ms = 0;
    config.spawn.seed = Some(99);
    config
}

struct Harness {
    game: Game,
    clock: Arc<ManualClock>,
    store: Arc<MemoryStore>,
    events: UnboundedReceiver<GameEvent>,
}

impl Harness {
    fn new(config: GameConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    fn with_store(config: GameConfig, store: Arc<MemoryStore>) -> Self {
        let clock = Arc::new(ManualClock::new(0));
        let (tx, events) = mpsc::unbounded_channel();
        let game = Game::new(
            config,
            Arc::clone(&clock) as Arc<dyn ramen_core::clock::Clock>,
            Box::new(Arc::clone(&store)),
            Box::new(ChannelObserver::new(tx)),
        )
        .unwrap();
        Self {
            game,
            clock,
            store,
            events,
        }
    }

    fn tick_at(&mut self, now: u64) {
        self.clock.set(now);
        self.game.tick();
    }

    fn add_all(&mut self, items: &[&str]) -> CookOutcome {
        let mut last = None;
        for item in items {
            last = Some(self.game.add_ingredient(&IngredientId::from(*item)).unwrap());
        }
        last.unwrap()
    }

    fn drain(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    fn labels(&mut self) -> Vec<&'static str> {
        self.drain().iter().map(GameEvent::label).collect()
    }

    fn seated_patience(&self) -> f64 {
        self.game.snapshot().seats[0]
            .as_ref()
            .map(|c| c.patience_remaining)
            .unwrap()
    }
}

// =============================================================================
// Matching through the orchestrator
// =============================================================================

#[test]
fn full_basic_sequence_auto_cooks() {
    let mut h = Harness::new(test_config(60_000));
    h.game.start_game().unwrap();
    h.game.select_pot(0).unwrap();

    let outcome = h.add_all(&["water", "noodle", "soup"]);
    assert_eq!(
        outcome,
        CookOutcome::Cooking {
            pot: 0,
            menu: MenuId::from("basic")
        }
    );
    assert_eq!(h.game.snapshot().pots[0].state, PotState::Cooking);
}

#[test]
fn ambiguous_basic_needs_confirm_with_standard_catalog() {
    let mut h = Harness::new(GameConfig::default());
    h.game.start_game().unwrap();
    h.game.select_pot(0).unwrap();

    match h.add_all(&["water", "noodle", "soup"]) {
        CookOutcome::Filling {
            reachable,
            confirmable,
            ..
        } => {
            assert_eq!(confirmable, vec![MenuId::from("basic")]);
            assert!(reachable.contains(&MenuId::from("egg")));
        }
        CookOutcome::Cooking { .. } => unreachable!("basic must not auto-cook"),
    }

    let outcome = h.game.confirm_cook(&MenuId::from("basic")).unwrap();
    assert!(matches!(outcome, CookOutcome::Cooking { .. }));
}

#[test]
fn wrong_ingredient_resets_the_pot() {
    let mut h = Harness::new(GameConfig::default());
    h.game.start_game().unwrap();
    h.game.select_pot(0).unwrap();
    h.game.add_ingredient(&IngredientId::from("water")).unwrap();

    let result = h.game.add_ingredient(&IngredientId::from("kimchi"));
    assert!(matches!(
        result,
        Err(GameError::Cook(CookError::WrongIngredient { pot: 0, .. }))
    ));
    let snapshot = h.game.snapshot();
    let pot = &snapshot.pots[0];
    assert_eq!(pot.state, PotState::Empty);
    assert!(pot.ingredients.is_empty());
}

// =============================================================================
// Patience and lives
// =============================================================================

#[test]
fn patience_exhaustion_costs_a_life() {
    let mut h = Harness::new(test_config(15_000));
    h.game.start_game().unwrap();

    h.tick_at(0);
    assert_eq!(h.labels(), vec!["customer_spawned", "tick"]);

    h.tick_at(14_999);
    assert!(h.game.snapshot().seats[0].is_some());
    h.drain();

    h.tick_at(15_000);
    assert_eq!(
        h.labels(),
        vec!["customer_departed", "life_lost", "tick"]
    );
    assert!(h.game.snapshot().seats[0].is_none());
    assert_eq!(h.game.session().lives, 2);
    assert_eq!(h.game.state(), GameState::Playing);
}

#[test]
fn expired_customer_is_not_served_before_the_next_tick() {
    let mut h = Harness::new(test_config(6000));
    h.game.start_game().unwrap();
    h.tick_at(0);
    h.game.select_pot(0).unwrap();
    h.add_all(&["water", "noodle", "soup"]);
    h.tick_at(5999);
    assert_eq!(h.game.snapshot().pots[0].state, PotState::Done);
    let money = h.game.money();
    h.drain();

    // Patience ran out at 6000; no tick has evicted the customer yet.
    h.clock.set(7000);
    let result = h.game.try_serve(0);
    assert!(matches!(result, Err(GameError::NoCustomerForMenu(_))));
    assert_eq!(h.game.money(), money);
    assert_eq!(h.game.session().served, 0);
    assert_eq!(h.game.snapshot().pots[0].state, PotState::Done);
    assert!(h.drain().is_empty());

    h.tick_at(7000);
    assert_eq!(
        h.labels(),
        vec!["customer_departed", "life_lost", "tick"]
    );
    assert_eq!(h.game.session().lives, 2);
}

#[test]
fn departure_resets_the_streak() {
    let mut h = Harness::new(test_config(12_000));
    h.game.start_game().unwrap();
    h.tick_at(0);
    h.game.select_pot(0).unwrap();
    h.add_all(&["water", "noodle", "soup"]);
    h.tick_at(5000);
    h.game.try_serve(0).unwrap();
    assert_eq!(h.game.session().streak, 1);

    // The next customer arrives at 5000 and walks out at 17000.
    h.tick_at(5000);
    h.tick_at(17_000);
    assert_eq!(h.game.session().streak, 0);
    assert_eq!(h.game.session().best_streak, 1);
    assert_eq!(h.game.session().lives, 2);
}

#[test]
fn last_life_ends_the_game_and_persists() {
    let mut config = test_config(8000);
    config.stall.max_lives = 1;
    let mut h = Harness::new(config);
    h.game.start_game().unwrap();

    h.tick_at(0);
    h.game.select_pot(0).unwrap();
    h.add_all(&["water", "noodle", "soup"]);
    h.tick_at(5000);
    let served = h.game.try_serve(0).unwrap();
    // 3000 + floor(3000 * 0.375 * 0.5)
    assert_eq!(served.reward.total, 3562);

    h.tick_at(5000);
    h.drain();
    h.tick_at(13_000);

    let labels = h.labels();
    assert_eq!(labels, vec!["customer_departed", "life_lost", "game_over"]);
    assert_eq!(h.game.state(), GameState::GameOver);
    assert!(h.game.tick().is_none());
    assert!(h.game.snapshot().seats.iter().all(Option::is_none));

    let saved = h.store.load().unwrap();
    assert_eq!(saved.currency, 3562);
    assert_eq!(saved.total_served, 1);
    assert_eq!(saved.high_score, 3562);
    assert_eq!(saved.best_streak, 1);
    assert!(saved.last_saved_at.is_some());
    assert!(saved.unlocked_menus.contains(&MenuId::from("basic")));
}

#[test]
fn restart_after_game_over_begins_a_fresh_session() {
    let mut config = test_config(1000);
    config.stall.max_lives = 1;
    let mut h = Harness::new(config);
    h.game.start_game().unwrap();
    h.tick_at(0);
    h.tick_at(1000);
    assert_eq!(h.game.state(), GameState::GameOver);

    h.game.start_game().unwrap();
    assert_eq!(h.game.session().lives, 1);
    h.tick_at(2000);
    let seated = h.game.snapshot().seats[0].clone().unwrap();
    assert_eq!(seated.id, CustomerId(1));
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn serve_pays_reward_and_counts() {
    let mut h = Harness::new(test_config(20_000));
    h.game.start_game().unwrap();
    h.tick_at(0);
    h.game.select_pot(0).unwrap();
    h.add_all(&["water", "noodle", "soup"]);

    assert!(matches!(
        h.game.try_serve(0),
        Err(GameError::Cook(CookError::NotDone { .. }))
    ));

    h.tick_at(5000);
    h.drain();
    let outcome = h.game.try_serve(0).unwrap();
    assert_eq!(outcome.menu, MenuId::from("basic"));
    assert_eq!(outcome.reward.base_price, 3000);
    assert_eq!(outcome.reward.tip, 0);
    assert_eq!(outcome.reward.speed_bonus, 1125);
    assert_eq!(outcome.reward.total, 4125);
    assert_eq!(outcome.streak, 1);
    assert!(outcome.combo_bonus.is_none());

    let session = h.game.session();
    assert_eq!(session.money, 4125);
    assert_eq!(session.money_earned, 4125);
    assert_eq!(session.served, 1);

    let snapshot = h.game.snapshot();
    assert_eq!(snapshot.pots[0].state, PotState::Empty);
    assert!(snapshot.seats[0].is_none());
    assert_eq!(snapshot.leaving.len(), 1);
    assert!(snapshot.leaving[0].customer.served);

    assert_eq!(h.labels(), vec!["serve_succeeded"]);
}

#[test]
fn combo_bonus_fires_every_third_serve() {
    let mut h = Harness::new(test_config(600_000));
    h.game.start_game().unwrap();

    let mut now = 0;
    let mut bonuses = Vec::new();
    for _ in 0..7 {
        h.tick_at(now);
        h.game.select_pot(0).unwrap();
        h.add_all(&["water", "noodle", "soup"]);
        now += 5000;
        h.tick_at(now);
        let outcome = h.game.try_serve(0).unwrap();
        bonuses.push(outcome.combo_bonus);
    }

    assert_eq!(
        bonuses,
        vec![None, None, Some(500), None, None, Some(500), None]
    );
    let combos = h
        .drain()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::ComboBonus { .. }))
        .count();
    assert_eq!(combos, 2);
    assert_eq!(h.game.session().streak, 7);
    assert_eq!(h.game.session().best_streak, 7);
}

#[test]
fn done_dish_nobody_ordered_stays_in_the_pot() {
    let mut h = Harness::new(test_config(600_000));
    h.game.start_game().unwrap();
    h.tick_at(0);
    h.game.select_pot(1).unwrap();
    h.add_all(&["water", "chili", "noodle", "soup"]);
    h.tick_at(6000);

    let result = h.game.try_serve(1);
    assert!(matches!(result, Err(GameError::NoCustomerForMenu(m)) if m == MenuId::from("spicy")));
    assert_eq!(h.game.snapshot().pots[1].state, PotState::Done);
    assert_eq!(h.game.session().streak, 0);
}

// =============================================================================
// Pause / resume
// =============================================================================

#[test]
fn pause_delays_cook_completion_by_the_paused_time() {
    let mut h = Harness::new(test_config(600_000));
    h.game.start_game().unwrap();
    h.game.select_pot(0).unwrap();
    h.add_all(&["water", "chili", "noodle", "soup"]);

    h.tick_at(3000);
    h.game.pause().unwrap();
    h.clock.set(8000);
    assert!(h.game.tick().is_none());
    assert_eq!(h.game.resume().unwrap(), 5000);

    h.tick_at(10_999);
    assert_eq!(h.game.snapshot().pots[0].state, PotState::Cooking);
    h.tick_at(11_000);
    assert_eq!(h.game.snapshot().pots[0].state, PotState::Done);
}

#[test]
fn pause_leaves_patience_unchanged() {
    let mut plain = Harness::new(test_config(20_000));
    let mut paused = Harness::new(test_config(20_000));
    for h in [&mut plain, &mut paused] {
        h.game.start_game().unwrap();
        h.tick_at(0);
    }

    plain.tick_at(6000);

    paused.tick_at(2000);
    paused.game.pause().unwrap();
    paused.clock.set(9000);
    paused.game.resume().unwrap();
    paused.tick_at(13_000);

    assert_eq!(plain.seated_patience(), paused.seated_patience());
    assert_eq!(plain.seated_patience(), 0.7);
}

#[test]
fn player_actions_are_refused_while_paused() {
    let mut h = Harness::new(test_config(600_000));
    h.game.start_game().unwrap();
    h.game.pause().unwrap();
    assert!(matches!(
        h.game.add_ingredient(&IngredientId::from("water")),
        Err(GameError::NotPlaying {
            state: GameState::Paused
        })
    ));
    assert!(matches!(h.game.pause(), Err(GameError::NotPlaying { .. })));
}

// =============================================================================
// Persistence bridge
// =============================================================================

#[test]
fn go_to_menu_finalises_the_session() {
    let mut h = Harness::new(test_config(20_000));
    h.game.start_game().unwrap();
    h.tick_at(0);
    h.game.select_pot(0).unwrap();
    h.add_all(&["water", "noodle", "soup"]);
    h.tick_at(5000);
    h.game.try_serve(0).unwrap();
    h.game.pause().unwrap();

    h.game.go_to_menu();
    assert_eq!(h.game.state(), GameState::Menu);
    let saved = h.store.load().unwrap();
    assert_eq!(saved.currency, 4125);
    assert_eq!(saved.total_served, 1);
    assert!(h.game.snapshot().seats.iter().all(Option::is_none));
}

#[test]
fn unlock_menu_spends_money_and_persists() {
    let record = SaveRecord {
        currency: 6000,
        last_saved_at: Some(chrono::Utc::now()),
        ..SaveRecord::default()
    };
    let mut h = Harness::with_store(
        test_config(20_000),
        Arc::new(MemoryStore::with_record(record)),
    );
    assert_eq!(h.game.money(), 6000);

    let spicy = MenuId::from("spicy");
    assert_eq!(h.game.unlock_menu(&spicy).unwrap(), 5000);
    assert_eq!(h.game.money(), 1000);
    assert!(h.game.unlocked_menus().contains(&spicy));

    let saved = h.store.load().unwrap();
    assert_eq!(saved.currency, 1000);
    assert!(saved.unlocked_menus.contains(&spicy));

    assert!(matches!(
        h.game.unlock_menu(&spicy),
        Err(GameError::Unlock(UnlockError::AlreadyUnlocked(_)))
    ));
    assert!(matches!(
        h.game.unlock_menu(&MenuId::from("pizza")),
        Err(GameError::Unlock(UnlockError::UnknownMenu(_)))
    ));

    let board = h.game.menu_board();
    assert_eq!(board.len(), 2);
    assert!(board.iter().all(|entry| entry.unlocked));
}

#[test]
fn unaffordable_unlock_is_refused() {
    let mut h = Harness::new(test_config(20_000));
    let result = h.game.unlock_menu(&MenuId::from("spicy"));
    assert!(matches!(
        result,
        Err(GameError::Unlock(UnlockError::InsufficientFunds {
            cost: 5000,
            available: 0,
            ..
        }))
    ));
    assert_eq!(h.game.money(), 0);
}

/// A store whose every call fails.
struct BrokenStore;

impl SaveStore for BrokenStore {
    fn load(&self) -> Result<SaveRecord, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn save(&self, _record: &SaveRecord) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

#[test]
fn storage_failures_do_not_stop_play() {
    let clock = Arc::new(ManualClock::new(0));
    let (tx, _events) = mpsc::unbounded_channel();
    let mut game = Game::new(
        test_config(20_000),
        clock.clone(),
        Box::new(BrokenStore),
        Box::new(ChannelObserver::new(tx)),
    )
    .unwrap();
    assert_eq!(game.save_record().currency, 0);

    game.start_game().unwrap();
    clock.set(0);
    game.tick();
    game.select_pot(0).unwrap();
    for item in ["water", "noodle", "soup"] {
        game.add_ingredient(&IngredientId::from(item)).unwrap();
    }
    clock.set(5000);
    game.tick();
    game.try_serve(0).unwrap();
    game.go_to_menu();

    assert_eq!(game.state(), GameState::Menu);
    assert_eq!(game.save_record().currency, 4125);
    assert_eq!(game.save_record().total_served, 1);
}
