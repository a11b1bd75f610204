//! Pure random draws for customer generation.
//!
//! Both functions take the random source explicitly so a seeded
//! [`rand::rngs::StdRng`] makes spawning reproducible.

use ramen_catalog::Archetype;
use ramen_types::MenuId;
use rand::Rng;

/// Weighted draw over `archetypes` by `spawn_weight`.
///
/// Returns `None` when the list is empty or every weight is zero.
pub fn pick_archetype<'a, R: Rng + ?Sized>(
    archetypes: &'a [Archetype],
    rng: &mut R,
) -> Option<&'a Archetype> {
    let total: u64 = archetypes
        .iter()
        .map(|a| u64::from(a.spawn_weight))
        .fold(0, u64::saturating_add);
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_range(0..total);
    for archetype in archetypes {
        let weight = u64::from(archetype.spawn_weight);
        if roll < weight {
            return Some(archetype);
        }
        roll = roll.saturating_sub(weight);
    }
    // Unreachable with a consistent total; fall back to the last weighted entry.
    archetypes.iter().rev().find(|a| a.spawn_weight > 0)
}

/// Uniform draw of a menu from the archetype's allow-list intersected with
/// the unlocked menus. `allowed = None` means every unlocked menu.
///
/// Falls back to `fallback` when the intersection is empty.
pub fn pick_menu<R: Rng + ?Sized>(
    allowed: Option<&[MenuId]>,
    unlocked: &[MenuId],
    fallback: &MenuId,
    rng: &mut R,
) -> MenuId {
    let candidates: Vec<&MenuId> = unlocked
        .iter()
        .filter(|menu| allowed.is_none_or(|list| list.contains(menu)))
        .collect();
    if candidates.is_empty() {
        return fallback.clone();
    }
    let index = rng.random_range(0..candidates.len());
    candidates
        .get(index)
        .map_or_else(|| fallback.clone(), |menu| (*menu).clone())
}
