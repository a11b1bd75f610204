//! Error types for the seating manager.

use ramen_types::{CustomerId, MenuId};

/// Reasons a seating operation is rejected.
#[derive(Debug, thiserror::Error)]
pub enum SeatingError {
    /// No seated customer carries this identity.
    #[error("customer {0} is not seated")]
    NotSeated(CustomerId),

    /// The customer was already served or has left.
    #[error("customer {0} is no longer waiting")]
    NotWaiting(CustomerId),

    /// The customer's patience ran out before the dish arrived.
    #[error("customer {0} ran out of patience")]
    PatienceExhausted(CustomerId),

    /// The ordered menu has no catalog price.
    #[error("menu {0} has no catalog price")]
    UnpricedMenu(MenuId),
}
