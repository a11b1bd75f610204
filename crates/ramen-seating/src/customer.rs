//! Patience decay and the reward formula.

use ramen_types::{Customer, Millis, Reward};

/// Remaining patience fraction at `now`: `1 - elapsed / patience`,
/// clamped to `[0, 1]`. Zero patience reads as exhausted.
#[allow(clippy::cast_precision_loss)]
pub fn patience_at(customer: &Customer, now: Millis) -> f64 {
    if customer.patience_ms == 0 {
        return 0.0;
    }
    let elapsed = now.saturating_sub(customer.arrived_at);
    if elapsed >= customer.patience_ms {
        return 0.0;
    }
    (1.0 - elapsed as f64 / customer.patience_ms as f64).clamp(0.0, 1.0)
}

/// Whether the customer's patience has run out by `now`.
pub const fn is_exhausted(customer: &Customer, now: Millis) -> bool {
    now.saturating_sub(customer.arrived_at) >= customer.patience_ms
}

/// Recompute `patience_remaining` at `now`. The value never increases.
///
/// Returns `true` once patience is exhausted.
pub fn update_patience(customer: &mut Customer, now: Millis) -> bool {
    let remaining = patience_at(customer, now).min(customer.patience_remaining);
    customer.patience_remaining = remaining;
    is_exhausted(customer, now)
}

/// Money earned for serving a dish priced `base_price`.
///
/// - `tip = floor(base * (multiplier - 1))`
/// - `speed_bonus = floor(base * patience * ratio)`
/// - `total = floor(base * multiplier) + speed_bonus`
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn compute_reward(
    base_price: u64,
    tip_multiplier: f64,
    patience_remaining: f64,
    speed_bonus_ratio: f64,
) -> Reward {
    let base = base_price as f64;
    let patience = patience_remaining.clamp(0.0, 1.0);
    let tip = (base * (tip_multiplier - 1.0)).floor() as i64;
    let speed_bonus = (base * patience * speed_bonus_ratio).floor().max(0.0) as u64;
    let priced = (base * tip_multiplier).floor().max(0.0) as u64;
    Reward {
        base_price,
        tip,
        speed_bonus,
        total: priced.saturating_add(speed_bonus),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use ramen_types::{ArchetypeId, CustomerId, MenuId};

    use super::*;

    fn customer(arrived_at: Millis, patience_ms: u64) -> Customer {
        Customer {
            id: CustomerId(1),
            archetype: ArchetypeId::from("normal"),
            menu: MenuId::from("basic"),
            seat: 0,
            arrived_at,
            patience_ms,
            tip_multiplier: 1.0,
            patience_remaining: 1.0,
            served: false,
            left: false,
        }
    }

    #[test]
    fn patience_decays_linearly() {
        let c = customer(1000, 10_000);
        assert_eq!(patience_at(&c, 1000), 1.0);
        assert!((patience_at(&c, 6000) - 0.5).abs() < 1e-9);
        assert_eq!(patience_at(&c, 11_000), 0.0);
        assert_eq!(patience_at(&c, 50_000), 0.0);
    }

    #[test]
    fn patience_before_arrival_is_full() {
        let c = customer(5000, 10_000);
        assert_eq!(patience_at(&c, 1000), 1.0);
    }

    #[test]
    fn patience_never_recovers() {
        let mut c = customer(0, 10_000);
        assert!(!update_patience(&mut c, 8000));
        let low = c.patience_remaining;
        assert!(!update_patience(&mut c, 2000));
        assert_eq!(c.patience_remaining, low);
    }

    #[test]
    fn exhaustion_is_reported_at_the_deadline() {
        let mut c = customer(0, 15_000);
        assert!(!update_patience(&mut c, 14_999));
        assert!(c.patience_remaining > 0.0);
        assert!(update_patience(&mut c, 15_000));
        assert_eq!(c.patience_remaining, 0.0);
    }

    #[test]
    fn reward_for_plain_customer() {
        let reward = compute_reward(3000, 1.0, 1.0, 0.5);
        assert_eq!(
            reward,
            Reward {
                base_price: 3000,
                tip: 0,
                speed_bonus: 1500,
                total: 4500,
            }
        );
    }

    #[test]
    fn reward_for_generous_customer_at_half_patience() {
        let reward = compute_reward(4000, 1.5, 0.5, 0.5);
        assert_eq!(reward.tip, 2000);
        assert_eq!(reward.speed_bonus, 1000);
        assert_eq!(reward.total, 7000);
    }

    #[test]
    fn reward_with_no_patience_left_has_no_speed_bonus() {
        let reward = compute_reward(5000, 2.0, 0.0, 0.5);
        assert_eq!(reward.tip, 5000);
        assert_eq!(reward.speed_bonus, 0);
        assert_eq!(reward.total, 10_000);
    }

    #[test]
    fn stingy_customer_tips_negative() {
        let reward = compute_reward(5000, 0.5, 0.0, 0.5);
        assert_eq!(reward.tip, -2500);
        assert_eq!(reward.total, 2500);
    }

    #[test]
    fn speed_bonus_is_floored() {
        // 3000 * 0.3333 * 0.5 = 499.95
        let reward = compute_reward(3000, 1.0, 0.3333, 0.5);
        assert_eq!(reward.speed_bonus, 499);
    }
}
