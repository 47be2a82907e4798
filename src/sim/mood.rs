//! Billu's mood state machine
//!
//! Moods change only through discrete events, so the delayed "relax after
//! release" can never stomp on a hit reaction or on the ending.

use serde::{Deserialize, Serialize};

/// Expression shown on Billu's face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Idle,
    Scared,
    Sorry,
    Relief,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodState {
    Idle,
    /// A slingshot is being pulled (or was just released)
    Aiming,
    /// Recovering from a hit
    HitReacting,
    /// The game is ending; terminal
    Relieved,
}

impl MoodState {
    pub fn mood(self) -> Mood {
        match self {
            MoodState::Idle => Mood::Idle,
            MoodState::Aiming => Mood::Scared,
            MoodState::HitReacting => Mood::Sorry,
            MoodState::Relieved => Mood::Relief,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodEvent {
    DragBegan,
    /// Released; relax after `revert_ticks` unless something else happens
    DragEnded { revert_ticks: u32 },
    Collision,
    HitRecovered,
    PhaseEnded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodMachine {
    state: MoodState,
    /// A drag is in progress
    aiming: bool,
    /// Ticks until a released aim relaxes back to idle
    revert_in: Option<u32>,
}

impl Default for MoodMachine {
    fn default() -> Self {
        Self {
            state: MoodState::Idle,
            aiming: false,
            revert_in: None,
        }
    }
}

impl MoodMachine {
    pub fn state(&self) -> MoodState {
        self.state
    }

    pub fn mood(&self) -> Mood {
        self.state.mood()
    }

    pub fn handle(&mut self, event: MoodEvent) {
        if self.state == MoodState::Relieved {
            return;
        }
        match event {
            MoodEvent::DragBegan => {
                self.aiming = true;
                self.revert_in = None;
                if self.state != MoodState::HitReacting {
                    self.state = MoodState::Aiming;
                }
            }
            MoodEvent::DragEnded { revert_ticks } => {
                self.aiming = false;
                self.revert_in = Some(revert_ticks);
            }
            MoodEvent::Collision => {
                self.state = MoodState::HitReacting;
            }
            MoodEvent::HitRecovered => {
                if self.state == MoodState::HitReacting {
                    self.state = if self.aiming {
                        MoodState::Aiming
                    } else {
                        MoodState::Idle
                    };
                }
            }
            MoodEvent::PhaseEnded => {
                self.state = MoodState::Relieved;
                self.aiming = false;
                self.revert_in = None;
            }
        }
    }

    /// Advance the release countdown by one tick
    pub fn advance(&mut self) {
        let Some(remaining) = self.revert_in else {
            return;
        };
        if remaining > 1 {
            self.revert_in = Some(remaining - 1);
            return;
        }
        self.revert_in = None;
        if self.state == MoodState::Aiming && !self.aiming {
            self.state = MoodState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(machine: &mut MoodMachine, ticks: u32) {
        for _ in 0..ticks {
            machine.advance();
        }
    }

    #[test]
    fn test_release_relaxes_after_delay() {
        let mut m = MoodMachine::default();
        m.handle(MoodEvent::DragBegan);
        assert_eq!(m.mood(), Mood::Scared);
        m.handle(MoodEvent::DragEnded { revert_ticks: 30 });
        advance(&mut m, 29);
        assert_eq!(m.mood(), Mood::Scared);
        m.advance();
        assert_eq!(m.mood(), Mood::Idle);
    }

    #[test]
    fn test_hit_beats_release_timer() {
        let mut m = MoodMachine::default();
        m.handle(MoodEvent::DragBegan);
        m.handle(MoodEvent::DragEnded { revert_ticks: 30 });
        m.handle(MoodEvent::Collision);
        advance(&mut m, 30);
        assert_eq!(m.state(), MoodState::HitReacting);
        m.handle(MoodEvent::HitRecovered);
        assert_eq!(m.state(), MoodState::Idle);
    }

    #[test]
    fn test_new_drag_cancels_pending_relax() {
        let mut m = MoodMachine::default();
        m.handle(MoodEvent::DragBegan);
        m.handle(MoodEvent::DragEnded { revert_ticks: 30 });
        advance(&mut m, 10);
        m.handle(MoodEvent::DragBegan);
        advance(&mut m, 40);
        assert_eq!(m.state(), MoodState::Aiming);
    }

    #[test]
    fn test_recovery_returns_to_aiming_mid_drag() {
        let mut m = MoodMachine::default();
        m.handle(MoodEvent::Collision);
        m.handle(MoodEvent::DragBegan);
        assert_eq!(m.state(), MoodState::HitReacting);
        m.handle(MoodEvent::HitRecovered);
        assert_eq!(m.state(), MoodState::Aiming);
    }

    #[test]
    fn test_relieved_is_terminal() {
        let mut m = MoodMachine::default();
        m.handle(MoodEvent::PhaseEnded);
        for event in [
            MoodEvent::DragBegan,
            MoodEvent::Collision,
            MoodEvent::HitRecovered,
            MoodEvent::DragEnded { revert_ticks: 1 },
        ] {
            m.handle(event);
            m.advance();
            assert_eq!(m.mood(), Mood::Relief);
        }
    }

    #[test]
    fn test_zero_delay_relaxes_on_next_advance() {
        let mut m = MoodMachine::default();
        m.handle(MoodEvent::DragBegan);
        m.handle(MoodEvent::DragEnded { revert_ticks: 0 });
        m.advance();
        assert_eq!(m.mood(), Mood::Idle);
    }
}
