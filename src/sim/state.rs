//! Simulation state and entity types
//!
//! `SimState` is owned by the frame driver and handed to `tick` by exclusive
//! borrow once per tick; nothing else mutates it except the input translator
//! between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mood::{Mood, MoodMachine};
use super::rng::{Randomness, SeededRandom};
use super::spring::Spring2;
use crate::platform::Viewport;
use crate::renderer::colors;
use crate::tuning::Tuning;

/// Phase supplied by the meta layer every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Throwing is allowed and hits count
    Playing,
    /// Anger drained; short slow-down before the finish screen
    Ending,
    /// Finish screen is up
    Finished,
}

impl GamePhase {
    /// Ending and Finished both put Billu at ease
    pub fn is_over(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// A thrown projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cleared on settle or hit; the projectile is removed in the same tick
    pub active: bool,
    pub color: [f32; 4],
}

/// A spark from an impact burst
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, removed once it reaches 0
    pub life: f32,
    pub color: [f32; 4],
    pub size: f32,
}

/// The slingshot currently being pulled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start: Vec2,
    /// Finger position, never farther than `max_drag_dist` from `start`
    pub current: Vec2,
}

impl Drag {
    /// Launch direction and length: opposite the pull
    pub fn pull(&self) -> Vec2 {
        self.start - self.current
    }
}

/// Billu
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Anchor at the feet; recomputed on resize only
    pub pos: Vec2,
    pub scale: Vec2,
    pub scale_spring: Spring2,
    pub rotation: f32,
    pub is_hit: bool,
    /// Ticks left in the hit reaction
    pub hit_timer: u32,
    pub mood: MoodMachine,
    pub text: Option<&'static str>,
    /// Ticks left for `text`
    pub text_timer: u32,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: Vec2::ONE,
            scale_spring: Spring2::default(),
            rotation: 0.0,
            is_hit: false,
            hit_timer: 0,
            mood: MoodMachine::default(),
            text: None,
            text_timer: 0,
        }
    }
}

impl Character {
    pub fn mood(&self) -> Mood {
        self.mood.mood()
    }

    /// Center of the forgiving hit circle
    pub fn body_center(&self, body_offset: f32) -> Vec2 {
        self.pos - Vec2::new(0.0, body_offset)
    }
}

/// Everything the renderer needs for one frame, borrowed read-only
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub projectiles: &'a [Projectile],
    pub particles: &'a [Particle],
    pub character: &'a Character,
    pub drag: Option<Drag>,
    pub shake: f32,
    pub time_ticks: u64,
    pub viewport: Viewport,
    pub tuning: &'a Tuning,
}

/// Complete mutable world
pub struct SimState {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub character: Character,
    pub drag: Option<Drag>,
    /// Screen shake magnitude (pixels); decayed by the tick only
    pub shake: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Box<dyn Randomness>,
    /// Next entity ID
    next_id: u32,
}

impl SimState {
    pub fn new(tuning: Tuning, viewport: Viewport, rng: Box<dyn Randomness>) -> Self {
        let mut state = Self {
            tuning,
            viewport,
            projectiles: Vec::new(),
            particles: Vec::new(),
            character: Character::default(),
            drag: None,
            shake: 0.0,
            time_ticks: 0,
            rng,
            next_id: 1,
        };
        state.resize(viewport);
        state
    }

    /// Default tuning with a seeded PCG stream
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::new(Tuning::default(), viewport, Box::new(SeededRandom::new(seed)))
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Adopt new viewport dimensions and re-anchor Billu.
    ///
    /// Entity lists are left untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let padding = self
            .tuning
            .anchor_min_padding
            .max(viewport.height * self.tuning.anchor_padding_ratio);
        self.character.pos = Vec2::new(viewport.width / 2.0, viewport.height - padding);
    }

    /// Y coordinate of the virtual floor
    pub fn floor_y(&self) -> f32 {
        self.viewport.height - self.tuning.floor_offset
    }

    /// Launch a projectile
    pub fn spawn_projectile(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius: crate::consts::PROJECTILE_RADIUS,
            active: true,
            color: colors::PROJECTILE,
        });
        id
    }

    /// Spray a burst of particles from `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: [f32; 4]) {
        for _ in 0..crate::consts::PARTICLES_PER_BURST {
            let angle = self.rng.range(0.0, std::f32::consts::TAU);
            let speed = self.rng.range(2.0, 7.0);
            let size = self.rng.range(3.0, 8.0);
            let id = self.next_entity_id();
            self.particles.push(Particle {
                id,
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                color,
                size,
            });
        }

        let cap = self.tuning.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
        }
    }

    /// Read-only snapshot for the renderer
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            projectiles: &self.projectiles,
            particles: &self.particles,
            character: &self.character,
            drag: self.drag,
            shake: self.shake,
            time_ticks: self.time_ticks,
            viewport: self.viewport,
            tuning: &self.tuning,
        }
    }
}

impl std::fmt::Debug for SimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimState")
            .field("viewport", &self.viewport)
            .field("projectiles", &self.projectiles.len())
            .field("particles", &self.particles.len())
            .field("character", &self.character)
            .field("drag", &self.drag)
            .field("shake", &self.shake)
            .field("time_ticks", &self.time_ticks)
            .finish()
    }
}
