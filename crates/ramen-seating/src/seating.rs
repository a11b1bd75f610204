//! The seating manager: spawns customers into seats, ages their patience,
//! and evicts them when it runs out.
//!
//! Served customers leave the seat array at once, so the seat is free for
//! the next spawn. A copy stays in the `leaving` list until
//! `serve_clear_delay_ms` has passed, for the presentation layer only.

use std::sync::Arc;

use ramen_catalog::RecipeCatalog;
use ramen_types::{Customer, CustomerId, LeavingCustomer, MenuId, Millis, Reward};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::customer::{compute_reward, is_exhausted, patience_at, update_patience};
use crate::draw::{pick_archetype, pick_menu};
use crate::error::SeatingError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for the seating manager.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatingConfig {
    /// Number of seats.
    pub seats: usize,
    /// Lower bound of the spawn delay window (inclusive).
    pub spawn_interval_min_ms: u64,
    /// Upper bound of the spawn delay window (inclusive).
    pub spawn_interval_max_ms: u64,
    /// How long a served customer stays in the leaving list.
    pub serve_clear_delay_ms: u64,
    /// Global speed bonus ratio for the reward formula.
    pub speed_bonus_ratio: f64,
    /// Menu ordered when no allowed menu is unlocked.
    pub default_menu: MenuId,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            seats: 5,
            spawn_interval_min_ms: 3000,
            spawn_interval_max_ms: 8000,
            serve_clear_delay_ms: 800,
            speed_bonus_ratio: 0.5,
            default_menu: MenuId::from("basic"),
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// What changed during one `advance` call. Each customer appears at most
/// once across all reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatingReport {
    /// Customers that sat down.
    pub spawned: Vec<Customer>,
    /// Customers that ran out of patience and were evicted.
    pub departed: Vec<Customer>,
}

/// A completed service: the served customer and the money earned.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReceipt {
    /// The customer, marked `served`.
    pub customer: Customer,
    /// Reward computed at the moment of service.
    pub reward: Reward,
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Owns the seat array and the spawn schedule.
#[derive(Debug)]
pub struct SeatingManager {
    catalog: Arc<RecipeCatalog>,
    config: SeatingConfig,
    rng: StdRng,
    seats: Vec<Option<Customer>>,
    leaving: Vec<LeavingCustomer>,
    next_customer_id: u64,
    next_spawn_at: Option<Millis>,
    spawning: bool,
}

impl SeatingManager {
    /// Create a manager with all seats empty and spawning disabled.
    pub fn new(catalog: Arc<RecipeCatalog>, config: SeatingConfig, rng: StdRng) -> Self {
        let seats = vec![None; config.seats];
        Self {
            catalog,
            config,
            rng,
            seats,
            leaving: Vec::new(),
            next_customer_id: 1,
            next_spawn_at: None,
            spawning: false,
        }
    }

    /// Clear every seat, enable spawning, and schedule the first arrival.
    pub fn start(&mut self, now: Millis) {
        self.seats.iter_mut().for_each(|seat| *seat = None);
        self.leaving.clear();
        self.next_customer_id = 1;
        self.spawning = true;
        let first = self.schedule_next(now);
        info!(first_spawn_at = first, seats = self.seats.len(), "Seating opened");
    }

    /// Empty every seat and stop spawning.
    pub fn clear_all(&mut self) {
        self.seats.iter_mut().for_each(|seat| *seat = None);
        self.leaving.clear();
        self.spawning = false;
        self.next_spawn_at = None;
    }

    /// Spawn if due, then age every seated customer and evict the ones
    /// out of patience. `unlocked` is the menu set customers may order from.
    pub fn advance(&mut self, now: Millis, unlocked: &[MenuId]) -> SeatingReport {
        let mut report = SeatingReport::default();

        self.leaving.retain(|l| l.clear_at > now);

        if self.spawning && self.next_spawn_at.is_some_and(|at| now >= at) {
            if let Some(customer) = self.spawn(now, unlocked) {
                report.spawned.push(customer);
            }
            self.schedule_next(now);
        }

        for seat in &mut self.seats {
            let exhausted = seat
                .as_mut()
                .is_some_and(|customer| update_patience(customer, now));
            if !exhausted {
                continue;
            }
            if let Some(mut customer) = seat.take() {
                customer.left = true;
                customer.patience_remaining = 0.0;
                info!(
                    customer = %customer.id,
                    seat = customer.seat,
                    menu = %customer.menu,
                    "Customer walked out"
                );
                report.departed.push(customer);
            }
        }

        report
    }

    /// The waiting customer who ordered `menu` with the least patience left
    /// at `now`. Customers whose patience ran out since the last advance
    /// are skipped; the next advance evicts them.
    pub fn find_customer_for_menu(&self, menu: &MenuId, now: Millis) -> Option<&Customer> {
        self.seats
            .iter()
            .flatten()
            .filter(|c| c.is_waiting() && &c.menu == menu && !is_exhausted(c, now))
            .min_by(|a, b| patience_at(a, now).total_cmp(&patience_at(b, now)))
    }

    /// Mark a customer served, free its seat, and compute the reward.
    ///
    /// # Errors
    ///
    /// - [`SeatingError::NotSeated`] if no seat holds this customer.
    /// - [`SeatingError::NotWaiting`] if it was already served or left.
    /// - [`SeatingError::PatienceExhausted`] if its patience ran out by
    ///   `now`. The customer stays seated for the next advance to evict.
    /// - [`SeatingError::UnpricedMenu`] if the ordered menu has no price.
    pub fn complete_service(
        &mut self,
        id: CustomerId,
        now: Millis,
    ) -> Result<ServiceReceipt, SeatingError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|seat| seat.as_ref().is_some_and(|c| c.id == id))
            .ok_or(SeatingError::NotSeated(id))?;
        let waiting = seat.as_ref().is_some_and(Customer::is_waiting);
        if !waiting {
            return Err(SeatingError::NotWaiting(id));
        }
        if seat.as_ref().is_some_and(|c| is_exhausted(c, now)) {
            return Err(SeatingError::PatienceExhausted(id));
        }
        let menu = seat
            .as_ref()
            .map(|c| c.menu.clone())
            .ok_or(SeatingError::NotSeated(id))?;
        let base_price = self
            .catalog
            .price_of(&menu)
            .ok_or_else(|| SeatingError::UnpricedMenu(menu.clone()))?;

        let mut customer = seat.take().ok_or(SeatingError::NotSeated(id))?;
        update_patience(&mut customer, now);
        customer.served = true;
        let reward = compute_reward(
            base_price,
            customer.tip_multiplier,
            customer.patience_remaining,
            self.config.speed_bonus_ratio,
        );

        self.leaving.push(LeavingCustomer {
            customer: customer.clone(),
            clear_at: now.saturating_add(self.config.serve_clear_delay_ms),
        });
        info!(
            customer = %customer.id,
            seat = customer.seat,
            menu = %customer.menu,
            total = reward.total,
            "Customer served"
        );
        Ok(ServiceReceipt { customer, reward })
    }

    /// Push every in-flight timestamp forward by `delta` (pause compensation).
    pub fn shift_timers(&mut self, delta: Millis) {
        for customer in self.seats.iter_mut().flatten() {
            customer.arrived_at = customer.arrived_at.saturating_add(delta);
        }
        for leaving in &mut self.leaving {
            leaving.clear_at = leaving.clear_at.saturating_add(delta);
        }
        if let Some(at) = self.next_spawn_at.as_mut() {
            *at = at.saturating_add(delta);
        }
    }

    /// The seat array; `None` is an empty seat.
    pub fn seats(&self) -> &[Option<Customer>] {
        &self.seats
    }

    /// Served customers still shown on their way out.
    pub fn leaving(&self) -> &[LeavingCustomer] {
        &self.leaving
    }

    /// Number of occupied seats.
    pub fn seated_count(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    /// When the next spawn is due, if spawning is enabled.
    pub const fn next_spawn_at(&self) -> Option<Millis> {
        self.next_spawn_at
    }

    /// Whether the manager is currently spawning customers.
    pub const fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Seat a new customer in the lowest empty seat, if any.
    fn spawn(&mut self, now: Millis, unlocked: &[MenuId]) -> Option<Customer> {
        let Some(seat) = self.seats.iter().position(Option::is_none) else {
            debug!("All seats taken, spawn skipped");
            return None;
        };
        let archetype = pick_archetype(self.catalog.archetypes(), &mut self.rng)?;
        let menu = pick_menu(
            archetype.allowed_menus.as_deref(),
            unlocked,
            &self.config.default_menu,
            &mut self.rng,
        );

        let id = CustomerId(self.next_customer_id);
        self.next_customer_id = self.next_customer_id.saturating_add(1);
        let customer = Customer {
            id,
            archetype: archetype.id.clone(),
            menu,
            seat,
            arrived_at: now,
            patience_ms: archetype.patience_ms,
            tip_multiplier: archetype.tip_multiplier,
            patience_remaining: 1.0,
            served: false,
            left: false,
        };
        info!(
            customer = %customer.id,
            seat,
            archetype = %customer.archetype,
            menu = %customer.menu,
            "Customer arrived"
        );
        let slot = self.seats.get_mut(seat)?;
        *slot = Some(customer.clone());
        Some(customer)
    }

    /// Draw the next spawn delay and record the due time.
    fn schedule_next(&mut self, now: Millis) -> Millis {
        let min = self.config.spawn_interval_min_ms;
        let max = self.config.spawn_interval_max_ms.max(min);
        let delay = self.rng.random_range(min..=max);
        let at = now.saturating_add(delay);
        self.next_spawn_at = Some(at);
        at
    }
}
