//! Attack-versus-hurtbox hit detection.
//!
//! Every attack box of the attacker's frame is tested against every hurtbox
//! of the defender's frame after both are projected into world space. The
//! cost is `attacks * hurtboxes` box tests; there is no spatial index because
//! a frame rarely carries more than a handful of boxes.
//!
//! Results come out attack-major, hurt-minor: all hits of the first attack
//! box precede those of the second, and within one attack box the hurtboxes
//! appear in authoring order.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::frame::Frame;
use crate::hitbox::{Hitbox, HitboxType};
use crate::projection::{project_hitbox, Placement, Placement3D};

/// One overlap between an attack box and a hurtbox.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CollisionResult {
    /// Always true for results produced by [`detect_hits`]
    pub hit: bool,
    /// Attacker's box that connected
    pub attack_hitbox: Hitbox,
    /// Defender's box that was struck
    pub hurt_hitbox: Hitbox,
    /// Damage, copied from the attack box
    pub damage: i32,
    /// Knockback, copied from the attack box
    pub knockback: i32,
    /// Center of the world-space overlap rectangle
    pub hit_location: Vec2,
}

/// Finds every attack/hurtbox overlap between two placed frames.
///
/// Returns an empty vector without testing anything when the attacker has
/// no attack boxes or the defender has no hurtboxes.
#[must_use]
pub fn detect_hits(
    attacker: &Frame,
    attacker_at: Placement,
    defender: &Frame,
    defender_at: Placement,
) -> Vec<CollisionResult> {
    let mut results = Vec::new();

    if !attacker.has_attack_hitboxes() || !defender.has_hurtboxes() {
        return results;
    }

    for attack in attacker.hitboxes_of_type(HitboxType::Attack) {
        let attack_world = project_hitbox(attack, attacker_at);

        for hurt in defender.hitboxes_of_type(HitboxType::Hurtbox) {
            let hurt_world = project_hitbox(hurt, defender_at);

            if let Some(overlap) = attack_world.overlap(&hurt_world) {
                let hit_location = overlap.center();
                trace!(
                    "Hit: {} -> {} at ({}, {})",
                    attacker.name,
                    defender.name,
                    hit_location.x,
                    hit_location.y
                );
                results.push(CollisionResult {
                    hit: true,
                    attack_hitbox: *attack,
                    hurt_hitbox: *hurt,
                    damage: attack.damage,
                    knockback: attack.knockback,
                    hit_location,
                });
            }
        }
    }

    results
}

/// [`detect_hits`] with 3D world positions (X and Z are used).
#[must_use]
pub fn detect_hits_3d(
    attacker: &Frame,
    attacker_at: Placement3D,
    defender: &Frame,
    defender_at: Placement3D,
) -> Vec<CollisionResult> {
    detect_hits(attacker, attacker_at.to_2d(), defender, defender_at.to_2d())
}

/// Checks whether any attack box overlaps any hurtbox.
///
/// Same answer as `!detect_hits(..).is_empty()`, but stops at the first
/// overlap and builds no results.
#[must_use]
pub fn any_hit(
    attacker: &Frame,
    attacker_at: Placement,
    defender: &Frame,
    defender_at: Placement,
) -> bool {
    if !attacker.has_attack_hitboxes() || !defender.has_hurtboxes() {
        return false;
    }

    attacker.hitboxes_of_type(HitboxType::Attack).any(|attack| {
        let attack_world = project_hitbox(attack, attacker_at);
        defender
            .hitboxes_of_type(HitboxType::Hurtbox)
            .any(|hurt| attack_world.intersects(&project_hitbox(hurt, defender_at)))
    })
}

/// [`any_hit`] with 3D world positions (X and Z are used).
#[must_use]
pub fn any_hit_3d(
    attacker: &Frame,
    attacker_at: Placement3D,
    defender: &Frame,
    defender_at: Placement3D,
) -> bool {
    any_hit(attacker, attacker_at.to_2d(), defender, defender_at.to_2d())
}
