//! Fixed-tick simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per fixed step, stages in a fixed order
//! - Randomness only through an injected `Randomness`
//! - Input applied between ticks, never mid-stage
//! - No rendering or platform dependencies beyond the viewport size

pub mod collision;
pub mod input;
pub mod mood;
pub mod rng;
pub mod spring;
pub mod state;
pub mod tick;

pub use collision::hits_character;
pub use input::PointerEvent;
pub use mood::{Mood, MoodEvent, MoodMachine, MoodState};
pub use rng::{Randomness, ScriptedRandom, SeededRandom};
pub use spring::{Spring2, spring_step};
pub use state::{Character, Drag, Frame, GamePhase, Particle, Projectile, SimState};
pub use tick::{TickInput, tick};
