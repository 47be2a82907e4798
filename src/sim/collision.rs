//! Projectile vs. Billu hit test
//!
//! A single circle around the body center rather than the drawn silhouette:
//! `hit_radius` is a tuning value, not a geometry measurement.

use super::state::{Character, Projectile};

/// Does `projectile` overlap Billu's hit circle?
///
/// The circle is centered `body_offset` above the anchor. Inactive
/// projectiles never hit.
pub fn hits_character(
    projectile: &Projectile,
    character: &Character,
    hit_radius: f32,
    body_offset: f32,
) -> bool {
    if !projectile.active {
        return false;
    }
    let dist = projectile.pos.distance(character.body_center(body_offset));
    dist < projectile.radius + hit_radius
}
