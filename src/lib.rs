//! Billu Sling - a slingshot toss game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (projectiles, particles, character, input)
//! - `renderer`: Scene tessellation and the WebGPU pipeline
//! - `platform`: Frame pacing, viewport, browser resource guards
//! - `tuning`: Data-driven physics and feel constants
//! - `session`: Anger meter and phases (the host-side meta layer)

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate, independent of the display refresh rate
    pub const TICK_HZ: f64 = 60.0;
    /// Milliseconds per simulation tick
    pub const TICK_INTERVAL_MS: f64 = 1000.0 / TICK_HZ;

    /// Particles per burst (a hit spawns two bursts)
    pub const PARTICLES_PER_BURST: usize = 10;

    /// Projectile size when launched from the slingshot
    pub const PROJECTILE_RADIUS: f32 = 12.0;

    /// Squash pose applied on impact (wide and flat)
    pub const HIT_SQUASH: (f32, f32) = (1.25, 0.8);
    /// Peak screen shake magnitude (pixels) on impact
    pub const HIT_SHAKE: f32 = 15.0;

    /// Lines Billu says when hit
    pub const HIT_PHRASES: &[&str] = &[
        "Arre yaar",
        "Okay okay",
        "Bas bas 😭",
        "Sorry na",
        "Oof!",
        "Galti ho gayi",
        "Wait...",
    ];

    /// Lines Billu mumbles while waiting
    pub const IDLE_PHRASES: &[&str] = &["sorry...", "haan meri galti...", "sunn lo na...", "..."];

    /// Anger meter (meta layer)
    pub const TOTAL_ANGER: f32 = 100.0;
    pub const ANGER_DRAIN_PER_HIT: f32 = 12.0;
    /// Length of the ending transition before the finished screen (2 seconds)
    pub const ENDING_TICKS: u32 = 120;
}

/// Pull `point` back onto the circle of radius `max_dist` around `origin`,
/// keeping its direction. Points already within range are returned as-is.
#[inline]
pub fn clamp_to_radius(origin: Vec2, point: Vec2, max_dist: f32) -> Vec2 {
    let delta = point - origin;
    let dist = delta.length();
    if dist > max_dist {
        origin + delta * (max_dist / dist)
    } else {
        point
    }
}
