//! Data-driven game feel
//!
//! Every physics and animation constant the simulation reads lives here so a
//! host page can override them with a JSON block. Missing fields fall back to
//! the defaults, which are the values the game was tuned with by hand.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ballistics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Horizontal velocity multiplier per tick while airborne
    pub air_drag: f32,
    /// Launch velocity per unit of pull
    pub drag_power: f32,
    /// Maximum slingshot stretch from the drag start
    pub max_drag_dist: f32,
    /// Pulls at or below this length are ignored on release
    pub min_launch_dist: f32,

    // === Floor ===
    /// Floor line sits this far above the bottom of the viewport
    pub floor_offset: f32,
    /// Vertical velocity kept (and reversed) on a floor bounce
    pub restitution: f32,
    /// Horizontal velocity multiplier on a floor bounce
    pub friction: f32,
    /// A bouncing projectile slower than this on both axes is removed
    pub settle_speed: f32,

    // === Hit test ===
    /// Forgiving radius around Billu's body center
    pub hit_radius: f32,
    /// Body center sits this far above Billu's anchor (feet)
    pub body_offset: f32,

    // === Character ===
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    /// Breathing phase advance per tick (radians)
    pub breath_rate: f32,
    /// Breathing scale amplitude
    pub breath_amplitude: f32,
    /// Ticks spent in the hit reaction
    pub hit_ticks: u32,
    /// Full width of the random rotation jiggle while hit (radians)
    pub hit_jiggle: f32,
    /// Rotation multiplier per tick when not hit
    pub rotation_decay: f32,
    /// Ticks after a release before a scared face relaxes
    pub mood_revert_ticks: u32,
    /// Minimum gap between Billu's feet and the bottom of the viewport
    pub anchor_min_padding: f32,
    /// Gap as a share of the viewport height, when larger than the minimum
    pub anchor_padding_ratio: f32,

    // === Speech ===
    pub hit_text_ticks: u32,
    pub idle_text_ticks: u32,
    /// Chance per tick of an idle line while nothing is being said
    pub idle_text_chance: f32,

    // === Effects ===
    /// Share of gravity applied to particles
    pub particle_gravity_scale: f32,
    /// Particle life lost per tick
    pub particle_decay: f32,
    /// Hard cap on live particles (oldest dropped first)
    pub max_particles: usize,
    /// Screen shake multiplier per tick
    pub shake_decay: f32,
    /// Shake below this snaps to zero
    pub shake_cutoff: f32,
    /// Steps simulated for the aiming trajectory preview
    pub preview_steps: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            air_drag: 0.999,
            drag_power: 0.15,
            max_drag_dist: 150.0,
            min_launch_dist: 15.0,

            floor_offset: 20.0,
            restitution: 0.5,
            friction: 0.98,
            settle_speed: 1.0,

            hit_radius: 55.0,
            body_offset: 40.0,

            spring_stiffness: 0.15,
            spring_damping: 0.85,
            breath_rate: 0.05,
            breath_amplitude: 0.02,
            hit_ticks: 30,
            hit_jiggle: 0.15,
            rotation_decay: 0.8,
            mood_revert_ticks: 30,
            anchor_min_padding: 160.0,
            anchor_padding_ratio: 0.2,

            hit_text_ticks: 120,
            idle_text_ticks: 150,
            idle_text_chance: 0.003,

            particle_gravity_scale: 0.4,
            particle_decay: 0.025,
            max_particles: 512,
            shake_decay: 0.9,
            shake_cutoff: 0.5,
            preview_steps: 25,
        }
    }
}

fn check(field: &'static str, value: f32, ok: bool, expected: &'static str) -> Result<(), TuningError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    check(field, value, value > 0.0, "> 0")
}

fn unit_open(field: &'static str, value: f32) -> Result<(), TuningError> {
    check(field, value, value > 0.0 && value < 1.0, "in (0, 1)")
}

fn unit_half_open(field: &'static str, value: f32) -> Result<(), TuningError> {
    check(field, value, value > 0.0 && value <= 1.0, "in (0, 1]")
}

impl Tuning {
    /// Parse and validate a JSON tuning block
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make the simulation diverge or never settle
    pub fn validate(&self) -> Result<(), TuningError> {
        check("gravity", self.gravity, self.gravity >= 0.0, ">= 0")?;
        unit_half_open("air_drag", self.air_drag)?;
        positive("drag_power", self.drag_power)?;
        positive("max_drag_dist", self.max_drag_dist)?;
        check(
            "min_launch_dist",
            self.min_launch_dist,
            self.min_launch_dist >= 0.0 && self.min_launch_dist < self.max_drag_dist,
            "in [0, max_drag_dist)",
        )?;

        check("floor_offset", self.floor_offset, self.floor_offset >= 0.0, ">= 0")?;
        unit_open("restitution", self.restitution)?;
        unit_half_open("friction", self.friction)?;
        positive("settle_speed", self.settle_speed)?;

        positive("hit_radius", self.hit_radius)?;
        check("body_offset", self.body_offset, true, "finite")?;

        unit_open("spring_stiffness", self.spring_stiffness)?;
        unit_open("spring_damping", self.spring_damping)?;
        check("breath_rate", self.breath_rate, self.breath_rate >= 0.0, ">= 0")?;
        check(
            "breath_amplitude",
            self.breath_amplitude,
            (0.0..0.5).contains(&self.breath_amplitude),
            "in [0, 0.5)",
        )?;
        check("hit_ticks", self.hit_ticks as f32, self.hit_ticks > 0, "> 0")?;
        check("hit_jiggle", self.hit_jiggle, self.hit_jiggle >= 0.0, ">= 0")?;
        check(
            "rotation_decay",
            self.rotation_decay,
            (0.0..1.0).contains(&self.rotation_decay),
            "in [0, 1)",
        )?;
        check(
            "anchor_min_padding",
            self.anchor_min_padding,
            self.anchor_min_padding >= 0.0,
            ">= 0",
        )?;
        check(
            "anchor_padding_ratio",
            self.anchor_padding_ratio,
            (0.0..1.0).contains(&self.anchor_padding_ratio),
            "in [0, 1)",
        )?;

        check(
            "idle_text_chance",
            self.idle_text_chance,
            (0.0..=1.0).contains(&self.idle_text_chance),
            "in [0, 1]",
        )?;

        check(
            "particle_gravity_scale",
            self.particle_gravity_scale,
            self.particle_gravity_scale >= 0.0,
            ">= 0",
        )?;
        check(
            "particle_decay",
            self.particle_decay,
            self.particle_decay > 0.0 && self.particle_decay <= 1.0,
            "in (0, 1]",
        )?;
        check(
            "max_particles",
            self.max_particles as f32,
            self.max_particles > 0,
            "> 0",
        )?;
        unit_open("shake_decay", self.shake_decay)?;
        positive("shake_cutoff", self.shake_cutoff)?;
        Ok(())
    }

    /// Stiffness/damping pair for the squash springs
    pub fn spring(&self) -> (f32, f32) {
        (self.spring_stiffness, self.spring_damping)
    }
}
