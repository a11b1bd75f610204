//! Push notifications from the orchestrator to the presentation layer.
//!
//! The orchestrator calls [`GameObserver::notify`] once per occurrence,
//! in the order things happened.

use ramen_types::GameEvent;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Receives every [`GameEvent`] the orchestrator emits.
pub trait GameObserver: Send {
    /// Called once per event.
    fn notify(&mut self, event: &GameEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl GameObserver for NoOpObserver {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Logs every event through `tracing`. Per-tick updates go to `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Tick { now, session } => {
                debug!(now, money = session.money, lives = session.lives, "Tick");
            }
            GameEvent::ServeSucceeded {
                customer,
                menu,
                reward,
                streak,
            } => info!(
                customer = %customer.id,
                menu = %menu,
                total = reward.total,
                streak,
                "Serve succeeded"
            ),
            GameEvent::ComboBonus { streak, bonus } => info!(streak, bonus, "Combo bonus"),
            GameEvent::LifeLost { lives } => info!(lives, "Life lost"),
            GameEvent::GameOver { stats } => info!(
                session = %stats.session_id,
                money_earned = stats.money_earned,
                served = stats.served,
                best_streak = stats.best_streak,
                "Game over"
            ),
            GameEvent::CustomerSpawned { customer } | GameEvent::CustomerDeparted { customer } => {
                info!(event = event.label(), customer = %customer.id, seat = customer.seat, "Customer");
            }
        }
    }
}

/// Forwards every event into an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    /// Forward events into `tx`.
    pub const fn new(tx: UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl GameObserver for ChannelObserver {
    fn notify(&mut self, event: &GameEvent) {
        if self.tx.send(event.clone()).is_err() {
            debug!(event = event.label(), "Event receiver dropped");
        }
    }
}

/// Fans one event out to several observers.
impl GameObserver for Vec<Box<dyn GameObserver>> {
    fn notify(&mut self, event: &GameEvent) {
        for observer in self.iter_mut() {
            observer.notify(event);
        }
    }
}
