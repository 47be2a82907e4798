//! Fixed timestep simulation tick
//!
//! Advances every entity by exactly one tick. The stage order is fixed:
//! projectiles, hits, particles, Billu's animation, idle chatter, the phase
//! override, then screen shake.

use glam::Vec2;

use super::collision::hits_character;
use super::input::{self, PointerEvent};
use super::mood::MoodEvent;
use super::state::{GamePhase, SimState};
use crate::consts::{HIT_PHRASES, HIT_SHAKE, HIT_SQUASH, IDLE_PHRASES};
use crate::renderer::colors;

/// Inputs for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Phase reported by the meta layer
    pub phase: GamePhase,
    /// Pointer events received since the previous tick, oldest first
    pub pointer: Vec<PointerEvent>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            phase: GamePhase::Playing,
            pointer: Vec::new(),
        }
    }
}

impl TickInput {
    pub fn new(phase: GamePhase) -> Self {
        Self {
            phase,
            pointer: Vec::new(),
        }
    }
}

/// Advance the simulation by one fixed tick.
///
/// `on_hit` is called once for every projectile that strikes Billu.
pub fn tick(state: &mut SimState, input: &TickInput, mut on_hit: impl FnMut()) {
    let phase = input.phase;
    for &event in &input.pointer {
        input::apply(state, event, phase);
    }

    state.time_ticks += 1;

    update_projectiles(state, phase, &mut on_hit);
    update_particles(state);
    animate_character(state);
    update_chatter(state, phase);

    if phase.is_over() {
        state.character.mood.handle(MoodEvent::PhaseEnded);
        state.character.text = None;
    }

    state.shake *= state.tuning.shake_decay;
    if state.shake < state.tuning.shake_cutoff {
        state.shake = 0.0;
    }
}

/// Integrate projectiles, bounce them off the floor, and resolve hits
fn update_projectiles(state: &mut SimState, phase: GamePhase, on_hit: &mut impl FnMut()) {
    let floor_y = state.floor_y();
    let t = &state.tuning;
    let mut impacts: Vec<(Vec2, [f32; 4])> = Vec::new();

    state.projectiles.retain_mut(|p| {
        if !p.active {
            return false;
        }

        p.pos += p.vel;
        p.vel.y += t.gravity;
        p.vel.x *= t.air_drag;

        if p.pos.y > floor_y {
            p.pos.y = floor_y;
            p.vel.y *= -t.restitution;
            p.vel.x *= t.friction;

            if p.vel.y.abs() < t.settle_speed && p.vel.x.abs() < t.settle_speed {
                log::debug!("projectile {} settled at x={:.1}", p.id, p.pos.x);
                p.active = false;
                return false;
            }
        }

        if phase == GamePhase::Playing
            && hits_character(p, &state.character, t.hit_radius, t.body_offset)
        {
            p.active = false;
            impacts.push((p.pos, p.color));
            return false;
        }

        true
    });

    for (pos, color) in impacts {
        register_hit(state, pos, color);
        on_hit();
    }
}

/// Billu takes a hit at `pos`
fn register_hit(state: &mut SimState, pos: Vec2, color: [f32; 4]) {
    state.spawn_burst(pos, color);
    state.spawn_burst(pos, colors::WHITE);

    let hit_ticks = state.tuning.hit_ticks;
    let text_ticks = state.tuning.hit_text_ticks;
    let phrase = HIT_PHRASES[state.rng.index(HIT_PHRASES.len())];

    let billu = &mut state.character;
    billu.is_hit = true;
    billu.hit_timer = hit_ticks;
    billu.mood.handle(MoodEvent::Collision);
    billu.scale = Vec2::new(HIT_SQUASH.0, HIT_SQUASH.1);
    billu.scale_spring.stop();
    billu.text = Some(phrase);
    billu.text_timer = text_ticks;

    state.shake = HIT_SHAKE;
    log::debug!("hit at ({:.1}, {:.1}): {phrase}", pos.x, pos.y);
}

fn update_particles(state: &mut SimState) {
    let gravity = state.tuning.gravity * state.tuning.particle_gravity_scale;
    let decay = state.tuning.particle_decay;
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += gravity;
        p.life -= decay;
        p.life > 0.0
    });
}

/// Breathing, squash recovery, hit jiggle
fn animate_character(state: &mut SimState) {
    let t = &state.tuning;
    let breath = (state.time_ticks as f32 * t.breath_rate).sin() * t.breath_amplitude;
    let target = Vec2::new(1.0 + breath, 1.0 - breath);
    let (k, d) = t.spring();
    let jiggle = t.hit_jiggle;
    let rotation_decay = t.rotation_decay;

    let billu = &mut state.character;
    billu.scale_spring.step(&mut billu.scale, target, k, d);

    if billu.hit_timer > 0 {
        billu.hit_timer -= 1;
        billu.rotation = (state.rng.unit() - 0.5) * jiggle;
        if billu.hit_timer == 0 {
            billu.is_hit = false;
            billu.rotation = 0.0;
            billu.mood.handle(MoodEvent::HitRecovered);
        }
    } else {
        billu.rotation *= rotation_decay;
    }

    billu.mood.advance();
}

/// Idle lines and speech timers
fn update_chatter(state: &mut SimState, phase: GamePhase) {
    if phase == GamePhase::Playing
        && state.character.text_timer == 0
        && state.rng.chance(state.tuning.idle_text_chance)
    {
        let phrase = IDLE_PHRASES[state.rng.index(IDLE_PHRASES.len())];
        state.character.text = Some(phrase);
        state.character.text_timer = state.tuning.idle_text_ticks;
    }

    let billu = &mut state.character;
    if billu.text_timer > 0 {
        billu.text_timer -= 1;
    } else {
        billu.text = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::sim::mood::Mood;
    use crate::sim::rng::ScriptedRandom;
    use crate::tuning::Tuning;

    fn viewport() -> Viewport {
        Viewport::new(400.0, 800.0, 1.0)
    }

    /// Deterministic state that never chatters on its own (samples of 0.5)
    fn quiet_state() -> SimState {
        SimState::new(
            Tuning::default(),
            viewport(),
            Box::new(ScriptedRandom::constant(0.5)),
        )
    }

    fn run(state: &mut SimState, phase: GamePhase, ticks: u32) -> u32 {
        let mut hits = 0;
        let input = TickInput::new(phase);
        for _ in 0..ticks {
            tick(state, &input, || hits += 1);
        }
        hits
    }

    #[test]
    fn test_ballistic_step() {
        let mut s = quiet_state();
        s.spawn_projectile(Vec2::new(10.0, 100.0), Vec2::new(4.0, -3.0));
        run(&mut s, GamePhase::Playing, 1);
        let p = &s.projectiles[0];
        assert_eq!(p.pos, Vec2::new(14.0, 97.0));
        assert!((p.vel.y - -2.5).abs() < 1e-6);
        assert!((p.vel.x - 4.0 * 0.999).abs() < 1e-6);
    }

    #[test]
    fn test_floor_bounce_reflects_and_damps() {
        let mut s = quiet_state();
        let floor = s.floor_y();
        s.spawn_projectile(Vec2::new(10.0, floor - 2.0), Vec2::new(5.0, 6.0));
        run(&mut s, GamePhase::Playing, 1);
        let p = &s.projectiles[0];
        assert_eq!(p.pos.y, floor);
        // (6 + 0.5) * -0.5
        assert!((p.vel.y - -3.25).abs() < 1e-5);
        assert!((p.vel.x - 5.0 * 0.999 * 0.98).abs() < 1e-5);
    }

    #[test]
    fn test_slow_projectile_on_floor_removed_within_one_tick() {
        let mut s = quiet_state();
        let floor = s.floor_y();
        s.spawn_projectile(Vec2::new(10.0, floor), Vec2::new(0.4, 0.3));
        run(&mut s, GamePhase::Playing, 1);
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_every_throw_eventually_settles() {
        let mut s = quiet_state();
        s.spawn_projectile(Vec2::new(20.0, 100.0), Vec2::new(-9.0, -12.0));
        s.spawn_projectile(Vec2::new(380.0, 700.0), Vec2::new(14.0, 3.0));
        for _ in 0..5000 {
            if s.projectiles.is_empty() {
                break;
            }
            run(&mut s, GamePhase::Playing, 1);
        }
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_particles_decay_and_expire_exactly() {
        let mut s = quiet_state();
        s.spawn_burst(Vec2::new(50.0, 50.0), colors::WHITE);
        let mut life = 1.0f32;
        for _ in 0..100 {
            let before = life;
            life -= s.tuning.particle_decay;
            run(&mut s, GamePhase::Playing, 1);
            if life > 0.0 {
                assert_eq!(s.particles.len(), 10);
                for p in &s.particles {
                    assert_eq!(p.life, life);
                    assert!(p.life < before);
                }
            } else {
                assert!(s.particles.is_empty());
                break;
            }
        }
        assert!(s.particles.is_empty());
    }

    #[test]
    fn test_hit_reaction() {
        let mut s = quiet_state();
        let target = s.character.body_center(s.tuning.body_offset);
        // One tick of travel lands it on the body center
        s.spawn_projectile(target - Vec2::new(5.0, 0.0), Vec2::new(5.0, 0.0));

        let hits = run(&mut s, GamePhase::Playing, 1);

        assert_eq!(hits, 1);
        assert!(s.projectiles.is_empty());
        assert_eq!(s.particles.len(), 20);
        assert_eq!(
            s.particles.iter().filter(|p| p.color == colors::WHITE).count(),
            10
        );
        let billu = &s.character;
        assert!(billu.is_hit);
        assert_eq!(billu.hit_timer, s.tuning.hit_ticks - 1);
        assert_eq!(billu.mood(), Mood::Sorry);
        assert!(billu.text.is_some_and(|t| HIT_PHRASES.contains(&t)));
        assert!(billu.scale.x > 1.1 && billu.scale.y < 0.9);
        assert!(billu.rotation.abs() <= s.tuning.hit_jiggle / 2.0);
        // Peak shake after one tick of decay
        assert!((s.shake - HIT_SHAKE * s.tuning.shake_decay).abs() < 1e-4);
    }

    #[test]
    fn test_no_hits_outside_playing() {
        let mut s = quiet_state();
        let target = s.character.body_center(s.tuning.body_offset);
        s.spawn_projectile(target, Vec2::ZERO);
        let hits = run(&mut s, GamePhase::Ending, 1);
        assert_eq!(hits, 0);
        assert_eq!(s.projectiles.len(), 1);
        assert!(!s.character.is_hit);
    }

    #[test]
    fn test_two_projectiles_two_notifications() {
        let mut s = quiet_state();
        let target = s.character.body_center(s.tuning.body_offset);
        s.spawn_projectile(target, Vec2::ZERO);
        s.spawn_projectile(target + Vec2::new(3.0, 0.0), Vec2::ZERO);
        let hits = run(&mut s, GamePhase::Playing, 3);
        assert_eq!(hits, 2);
        assert_eq!(s.particles.len(), 40);
    }

    #[test]
    fn test_hit_recovers_to_idle() {
        let mut s = quiet_state();
        let target = s.character.body_center(s.tuning.body_offset);
        s.spawn_projectile(target, Vec2::ZERO);
        let hit_ticks = s.tuning.hit_ticks;
        run(&mut s, GamePhase::Playing, hit_ticks);
        assert!(!s.character.is_hit);
        assert_eq!(s.character.rotation, 0.0);
        assert_eq!(s.character.mood(), Mood::Idle);
    }

    #[test]
    fn test_ending_forces_relief_and_silence() {
        // Samples of 0 would trigger idle chatter every tick while playing
        let mut s = SimState::new(
            Tuning::default(),
            viewport(),
            Box::new(ScriptedRandom::constant(0.0)),
        );
        s.character.text = Some("sorry...");
        s.character.text_timer = 100;
        let input = TickInput::new(GamePhase::Ending);
        for _ in 0..200 {
            tick(&mut s, &input, || panic!("no hits while ending"));
            assert_eq!(s.character.mood(), Mood::Relief);
            assert_eq!(s.character.text, None);
        }
    }

    #[test]
    fn test_relief_survives_drag_attempts() {
        let mut s = quiet_state();
        run(&mut s, GamePhase::Ending, 1);
        let input = TickInput {
            phase: GamePhase::Ending,
            pointer: vec![
                PointerEvent::Down(Vec2::new(10.0, 10.0)),
                PointerEvent::Move(Vec2::new(10.0, 100.0)),
                PointerEvent::Up,
            ],
        };
        tick(&mut s, &input, || {});
        assert!(s.drag.is_none());
        assert!(s.projectiles.is_empty());
        assert_eq!(s.character.mood(), Mood::Relief);
    }

    #[test]
    fn test_idle_chatter_and_expiry() {
        let mut s = SimState::new(
            Tuning::default(),
            viewport(),
            Box::new(ScriptedRandom::constant(0.0)),
        );
        run(&mut s, GamePhase::Playing, 1);
        assert_eq!(s.character.text, Some(IDLE_PHRASES[0]));
        assert_eq!(s.character.text_timer, s.tuning.idle_text_ticks - 1);

        // Chatter stays quiet until the line expires
        let mut s = quiet_state();
        s.character.text = Some("...");
        s.character.text_timer = 3;
        run(&mut s, GamePhase::Playing, 3);
        assert_eq!(s.character.text, Some("..."));
        run(&mut s, GamePhase::Playing, 1);
        assert_eq!(s.character.text, None);
    }

    #[test]
    fn test_breathing_keeps_billu_moving() {
        let mut s = quiet_state();
        run(&mut s, GamePhase::Playing, 40);
        let a = s.character.scale;
        run(&mut s, GamePhase::Playing, 20);
        let b = s.character.scale;
        assert_ne!(a, b);
        assert!((a.x - 1.0).abs() < 0.05 && (a.y - 1.0).abs() < 0.05);
        // Opposite phase on the two axes
        assert!((b.x - 1.0) * (b.y - 1.0) <= 0.0);
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut s = quiet_state();
        s.shake = HIT_SHAKE;
        run(&mut s, GamePhase::Playing, 1);
        assert!((s.shake - 13.5).abs() < 1e-4);
        run(&mut s, GamePhase::Playing, 40);
        assert_eq!(s.shake, 0.0);
    }

    #[test]
    fn test_queued_pointer_events_launch() {
        let mut s = quiet_state();
        let input = TickInput {
            phase: GamePhase::Playing,
            pointer: vec![
                PointerEvent::Down(Vec2::new(100.0, 100.0)),
                PointerEvent::Move(Vec2::new(100.0, 250.0)),
                PointerEvent::Up,
            ],
        };
        tick(&mut s, &input, || {});
        assert_eq!(s.projectiles.len(), 1);
        assert!(s.drag.is_none());
        assert_eq!(s.character.mood(), Mood::Scared);
        let revert_ticks = s.tuning.mood_revert_ticks;
        run(&mut s, GamePhase::Playing, revert_ticks);
        assert_eq!(s.character.mood(), Mood::Idle);
    }

    #[test]
    fn test_resize_between_ticks_keeps_flight() {
        let mut s = quiet_state();
        s.spawn_projectile(Vec2::new(10.0, 100.0), Vec2::new(1.0, 0.0));
        run(&mut s, GamePhase::Playing, 2);
        s.resize(Viewport::new(800.0, 600.0, 2.0));
        run(&mut s, GamePhase::Playing, 1);
        assert_eq!(s.projectiles.len(), 1);
        assert_eq!(s.character.pos, Vec2::new(400.0, 440.0));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn particle_life_strictly_decreases(seed in any::<u64>(), ticks in 1u32..60) {
                let mut s = SimState::with_seed(viewport(), seed);
                s.spawn_burst(Vec2::new(200.0, 200.0), colors::WHITE);
                for _ in 0..ticks {
                    let before: Vec<(u32, f32)> = s.particles.iter().map(|p| (p.id, p.life)).collect();
                    run(&mut s, GamePhase::Ending, 1);
                    for p in &s.particles {
                        prop_assert!(p.life > 0.0);
                        let old = before.iter().find(|(id, _)| *id == p.id).map(|(_, life)| *life);
                        prop_assert!(old.is_some_and(|old| p.life < old));
                    }
                }
            }
        }
    }
}
