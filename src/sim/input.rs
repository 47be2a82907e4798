//! Slingshot input translation
//!
//! Pointer and touch events become drag gesture state; releasing a long
//! enough pull launches a projectile away from the pull direction.

use glam::Vec2;

use super::mood::MoodEvent;
use super::state::{Drag, GamePhase, SimState};
use crate::clamp_to_radius;

/// Pointer/touch event in CSS pixels, queued by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Start a drag at `point` (only while playing)
pub fn begin(state: &mut SimState, point: Vec2, phase: GamePhase) {
    if phase != GamePhase::Playing {
        return;
    }
    state.drag = Some(Drag {
        start: point,
        current: point,
    });
    state.character.mood.handle(MoodEvent::DragBegan);
}

/// Follow the finger, clamped to the maximum stretch
pub fn update(state: &mut SimState, point: Vec2) {
    let max = state.tuning.max_drag_dist;
    if let Some(drag) = state.drag.as_mut() {
        drag.current = clamp_to_radius(drag.start, point, max);
    }
}

/// Release the slingshot.
///
/// Returns the ID of the launched projectile, if the pull was long enough and
/// the game is still playing. The drag is cleared either way.
pub fn end(state: &mut SimState, phase: GamePhase) -> Option<u32> {
    let drag = state.drag.take()?;

    let pull = drag.pull();
    let launched = if phase == GamePhase::Playing && pull.length() > state.tuning.min_launch_dist {
        let vel = pull * state.tuning.drag_power;
        let id = state.spawn_projectile(drag.start, vel);
        log::debug!("launched projectile {id} vel=({:.2}, {:.2})", vel.x, vel.y);
        Some(id)
    } else {
        None
    };

    let revert_ticks = state.tuning.mood_revert_ticks;
    state.character.mood.handle(MoodEvent::DragEnded { revert_ticks });
    launched
}

/// Dispatch one queued event
pub fn apply(state: &mut SimState, event: PointerEvent, phase: GamePhase) {
    match event {
        PointerEvent::Down(point) => begin(state, point, phase),
        PointerEvent::Move(point) => update(state, point),
        PointerEvent::Up => {
            end(state, phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::sim::mood::Mood;
    use proptest::prelude::*;

    fn state() -> SimState {
        SimState::with_seed(Viewport::new(400.0, 800.0, 1.0), 5)
    }

    #[test]
    fn test_release_launches_opposite_the_pull() {
        let mut s = state();
        begin(&mut s, Vec2::new(100.0, 100.0), GamePhase::Playing);
        update(&mut s, Vec2::new(100.0, 250.0));
        let id = end(&mut s, GamePhase::Playing);

        assert!(id.is_some());
        assert_eq!(s.projectiles.len(), 1);
        let p = &s.projectiles[0];
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
        let expected = -150.0 * s.tuning.drag_power;
        assert!(p.vel.x.abs() < 1e-5);
        assert!((p.vel.y - expected).abs() < 1e-4);
        assert!(p.active);
        assert!(s.drag.is_none());
    }

    #[test]
    fn test_short_pull_launches_nothing() {
        let mut s = state();
        begin(&mut s, Vec2::new(100.0, 100.0), GamePhase::Playing);
        update(&mut s, Vec2::new(106.0, 108.0)); // length 10
        assert_eq!(end(&mut s, GamePhase::Playing), None);
        assert!(s.projectiles.is_empty());
        assert!(s.drag.is_none());
    }

    #[test]
    fn test_begin_ignored_outside_playing() {
        let mut s = state();
        begin(&mut s, Vec2::new(10.0, 10.0), GamePhase::Ending);
        assert!(s.drag.is_none());
        assert_eq!(s.character.mood(), Mood::Idle);
    }

    #[test]
    fn test_update_and_end_without_drag_are_noops() {
        let mut s = state();
        update(&mut s, Vec2::new(10.0, 10.0));
        assert!(s.drag.is_none());
        assert_eq!(end(&mut s, GamePhase::Playing), None);
        assert_eq!(s.character.mood(), Mood::Idle);
    }

    #[test]
    fn test_release_after_game_ends_clears_without_launch() {
        let mut s = state();
        begin(&mut s, Vec2::new(100.0, 100.0), GamePhase::Playing);
        update(&mut s, Vec2::new(100.0, 250.0));
        assert_eq!(end(&mut s, GamePhase::Ending), None);
        assert!(s.drag.is_none());
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_begin_scares_billu() {
        let mut s = state();
        apply(&mut s, PointerEvent::Down(Vec2::new(1.0, 1.0)), GamePhase::Playing);
        assert_eq!(s.character.mood(), Mood::Scared);
    }

    #[test]
    fn test_repeated_zero_drags_never_dangle() {
        let mut s = state();
        for i in 0..20 {
            let point = Vec2::new(i as f32 * 3.0, 50.0);
            apply(&mut s, PointerEvent::Down(point), GamePhase::Playing);
            apply(&mut s, PointerEvent::Move(point), GamePhase::Playing);
            apply(&mut s, PointerEvent::Up, GamePhase::Playing);
            assert!(s.drag.is_none());
        }
        assert!(s.projectiles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_drag_is_clamped(
            sx in -500.0f32..500.0,
            sy in -500.0f32..500.0,
            angle in 0.0f32..std::f32::consts::TAU,
            extra in 0.5f32..2000.0,
        ) {
            let mut s = state();
            let start = Vec2::new(sx, sy);
            let max = s.tuning.max_drag_dist;
            let target = start + Vec2::new(angle.cos(), angle.sin()) * (max + extra);
            begin(&mut s, start, GamePhase::Playing);
            update(&mut s, target);
            let drag = s.drag.unwrap();
            let stretch = (drag.current - drag.start).length();
            prop_assert!((stretch - max).abs() < 1e-2, "stretch {}", stretch);
        }
    }
}
