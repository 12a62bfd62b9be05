//! Reductions over a batch of hit results.

use crate::collision::CollisionResult;

/// Sum of damage over all results, 0 when there are none.
#[must_use]
pub fn total_damage(results: &[CollisionResult]) -> i32 {
    results
        .iter()
        .fold(0i32, |total, result| total.saturating_add(result.damage))
}

/// Highest knockback over all results.
///
/// Starts from 0, so an empty batch and a batch of non-positive knockbacks
/// both report 0. Check `results.is_empty()` to tell "no hits" apart.
#[must_use]
pub fn max_knockback(results: &[CollisionResult]) -> i32 {
    results
        .iter()
        .fold(0i32, |max, result| max.max(result.knockback))
}
