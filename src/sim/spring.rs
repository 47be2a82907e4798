//! Damped spring used for squash and stretch
//!
//! One explicit step per tick. Values overshoot the target; the overshoot
//! is the jiggle after an impact.

use glam::Vec2;

/// Advance a single-axis spring by one tick.
///
/// Returns `(value, velocity)` after the step. Stable for `k` and `d` in (0, 1).
#[inline]
pub fn spring_step(current: f32, target: f32, velocity: f32, k: f32, d: f32) -> (f32, f32) {
    let force = (target - current) * k;
    let velocity = (velocity + force) * d;
    (current + velocity, velocity)
}

/// Two independent springs, one per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spring2 {
    pub velocity: Vec2,
}

impl Spring2 {
    /// Step both axes of `value` toward `target`
    pub fn step(&mut self, value: &mut Vec2, target: Vec2, k: f32, d: f32) {
        let (x, vx) = spring_step(value.x, target.x, self.velocity.x, k, d);
        let (y, vy) = spring_step(value.y, target.y, self.velocity.y, k, d);
        *value = Vec2::new(x, y);
        self.velocity = Vec2::new(vx, vy);
    }

    /// Drop any motion (used when snapping to a pose)
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}
