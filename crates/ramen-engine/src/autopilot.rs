//! A simple cook that plays the game through a [`GameHandle`].
//!
//! Each step looks at a snapshot and takes at most one action: serve a
//! finished dish somebody wants, or else start the order of the most
//! impatient customer nobody is cooking for yet.

use std::collections::BTreeMap;

use ramen_catalog::RecipeCatalog;
use ramen_core::error::GameError;
use ramen_core::runner::{GameHandle, RunnerError};
use ramen_kitchen::CookOutcome;
use ramen_types::{GameSnapshot, MenuId, PotState};
use tracing::{debug, info};

use crate::error::EngineError;

/// The next move the autopilot wants to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Serve the finished dish in this pot.
    Serve(usize),
    /// Cook `menu` in the empty pot `pot`.
    Cook {
        /// An empty pot.
        pot: usize,
        /// The recipe to cook.
        menu: MenuId,
    },
}

/// Choose the next action for `snapshot`, if any.
pub fn plan(snapshot: &GameSnapshot) -> Option<Action> {
    let mut waiting: Vec<_> = snapshot
        .seats
        .iter()
        .flatten()
        .filter(|c| c.is_waiting())
        .collect();
    waiting.sort_by(|a, b| a.patience_remaining.total_cmp(&b.patience_remaining));

    // Serve first: a done dish that someone ordered.
    for pot in &snapshot.pots {
        if pot.state == PotState::Done
            && let Some(menu) = pot.target.as_ref()
            && waiting.iter().any(|c| &c.menu == menu)
        {
            return Some(Action::Serve(pot.index));
        }
    }

    // Dishes already on the stove cover that many orders.
    let mut covered: BTreeMap<&MenuId, usize> = BTreeMap::new();
    for pot in &snapshot.pots {
        if let Some(menu) = pot.target.as_ref() {
            let count = covered.entry(menu).or_default();
            *count = count.saturating_add(1);
        }
    }

    let empty_pot = snapshot
        .pots
        .iter()
        .find(|p| p.state == PotState::Empty)?
        .index;

    for customer in waiting {
        match covered.get_mut(&customer.menu) {
            Some(count) if *count > 0 => *count = count.saturating_sub(1),
            _ => {
                return Some(Action::Cook {
                    pot: empty_pot,
                    menu: customer.menu.clone(),
                });
            }
        }
    }
    None
}

/// Drives a game loop through its handle.
#[derive(Debug)]
pub struct Autopilot {
    handle: GameHandle,
    catalog: RecipeCatalog,
}

impl Autopilot {
    /// Create an autopilot for the game behind `handle`.
    pub const fn new(handle: GameHandle, catalog: RecipeCatalog) -> Self {
        Self { handle, catalog }
    }

    /// Look at the game and take at most one action. Returns the snapshot
    /// the decision was based on.
    ///
    /// Rejections the game reports (a customer left a moment ago, a pot
    /// state changed) are logged and skipped.
    pub async fn step(&self) -> Result<GameSnapshot, EngineError> {
        let snapshot = self.handle.snapshot().await?;
        let Some(action) = plan(&snapshot) else {
            return Ok(snapshot);
        };

        let result = match &action {
            Action::Serve(pot) => self.serve(*pot).await,
            Action::Cook { pot, menu } => self.cook(*pot, menu).await,
        };
        match result {
            Ok(()) => Ok(snapshot),
            Err(RunnerError::Game(err)) => {
                debug!(?action, error = %err, "Action rejected");
                Ok(snapshot)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn serve(&self, pot: usize) -> Result<(), RunnerError> {
        let outcome = self.handle.try_serve(pot).await?;
        info!(
            pot,
            menu = %outcome.menu,
            total = outcome.reward.total,
            streak = outcome.streak,
            "Autopilot served"
        );
        Ok(())
    }

    async fn cook(&self, pot: usize, menu: &MenuId) -> Result<(), RunnerError> {
        let recipe = self
            .catalog
            .recipe(menu)
            .ok_or_else(|| RunnerError::Game(GameError::NoCustomerForMenu(menu.clone())))?;

        self.handle.select_pot(pot).await?;
        let mut last = None;
        for ingredient in &recipe.ingredients {
            last = Some(self.handle.add_ingredient(ingredient.clone()).await?);
        }
        if let Some(CookOutcome::Filling { confirmable, .. }) = last
            && confirmable.contains(menu)
        {
            self.handle.confirm_cook(menu.clone()).await?;
        }
        debug!(pot, menu = %menu, "Autopilot started cooking");
        Ok(())
    }
}
