//! Seating manager for the ramen stall: customer arrival, patience decay,
//! departure, and the reward formula.
//!
//! # Modules
//!
//! - [`customer`] -- Patience decay and [`compute_reward`]
//! - [`draw`] -- Pure weighted archetype and uniform menu draws
//! - [`error`] -- [`SeatingError`]
//! - [`seating`] -- [`SeatingManager`], the seat array and spawn schedule

pub mod customer;
pub mod draw;
pub mod error;
pub mod seating;

pub use customer::{compute_reward, is_exhausted, patience_at, update_patience};
pub use draw::{pick_archetype, pick_menu};
pub use error::SeatingError;
pub use seating::{SeatingConfig, SeatingManager, SeatingReport, ServiceReceipt};
