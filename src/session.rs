//! Anger meter and game phases
//!
//! The simulation only reports hits; this layer turns them into progress
//! and decides when the round ends.

use crate::consts::{ANGER_DRAIN_PER_HIT, ENDING_TICKS, TOTAL_ANGER};
use crate::sim::GamePhase;

/// Color band of the anger bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTone {
    Hot,
    Warm,
    Calm,
}

impl BarTone {
    /// CSS class used by the host page
    pub fn css_class(self) -> &'static str {
        match self {
            BarTone::Hot => "hot",
            BarTone::Warm => "warm",
            BarTone::Calm => "calm",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub anger: f32,
    pub phase: GamePhase,
    /// Ticks left in the ending transition
    pub ending_ticks: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            anger: TOTAL_ANGER,
            phase: GamePhase::Playing,
            ending_ticks: 0,
        }
    }

    /// Register a hit. Returns true if it ended the round.
    pub fn on_hit(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.anger -= ANGER_DRAIN_PER_HIT;
        if self.anger > 0.0 {
            return false;
        }

        self.anger = 0.0;
        self.phase = GamePhase::Ending;
        self.ending_ticks = ENDING_TICKS;
        log::info!("Anger drained, ending");
        true
    }

    /// Advance the ending countdown. Returns true when the phase changed.
    pub fn tick(&mut self) -> bool {
        if self.phase != GamePhase::Ending {
            return false;
        }
        self.ending_ticks = self.ending_ticks.saturating_sub(1);
        if self.ending_ticks == 0 {
            self.phase = GamePhase::Finished;
            log::info!("Round finished");
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Remaining anger in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        (self.anger / TOTAL_ANGER).clamp(0.0, 1.0)
    }

    /// Whole percent shown next to the bar
    pub fn percent(&self) -> u32 {
        self.anger.max(0.0).floor() as u32
    }

    pub fn label(&self) -> &'static str {
        match self.anger {
            a if a > 80.0 => "Gussa Level: High",
            a if a > 50.0 => "Thoda kam ho raha hai...",
            a if a > 20.0 => "Almost calm...",
            _ => "Bas hone wala hai...",
        }
    }

    pub fn tone(&self) -> BarTone {
        match self.fraction() {
            p if p > 0.6 => BarTone::Hot,
            p if p > 0.3 => BarTone::Warm,
            _ => BarTone::Calm,
        }
    }

    /// The drag hint is shown until the first hit lands
    pub fn show_hint(&self) -> bool {
        self.phase == GamePhase::Playing && self.anger >= TOTAL_ANGER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_hits_end_the_round() {
        let mut session = Session::new();
        for _ in 0..8 {
            assert!(!session.on_hit());
        }
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.percent(), 4);

        assert!(session.on_hit());
        assert_eq!(session.phase, GamePhase::Ending);
        assert_eq!(session.anger, 0.0);
    }

    #[test]
    fn test_hits_ignored_after_playing() {
        let mut session = Session::new();
        session.phase = GamePhase::Ending;
        assert!(!session.on_hit());
        assert_eq!(session.anger, TOTAL_ANGER);
    }

    #[test]
    fn test_ending_lasts_two_seconds() {
        let mut session = Session::new();
        while !session.on_hit() {}

        for _ in 0..ENDING_TICKS - 1 {
            assert!(!session.tick());
        }
        assert_eq!(session.phase, GamePhase::Ending);
        assert!(session.tick());
        assert_eq!(session.phase, GamePhase::Finished);
        assert!(!session.tick());
    }

    #[test]
    fn test_labels_follow_anger() {
        let mut session = Session::new();
        assert_eq!(session.label(), "Gussa Level: High");
        assert_eq!(session.tone(), BarTone::Hot);
        session.anger = 64.0;
        assert_eq!(session.label(), "Thoda kam ho raha hai...");
        session.anger = 40.0;
        assert_eq!(session.label(), "Almost calm...");
        assert_eq!(session.tone(), BarTone::Warm);
        session.anger = 4.0;
        assert_eq!(session.label(), "Bas hone wala hai...");
        assert_eq!(session.tone(), BarTone::Calm);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut session = Session::new();
        session.on_hit();
        assert!(!session.show_hint());
        session.reset();
        assert_eq!(session, Session::new());
        assert!(session.show_hint());
        assert_eq!(session.fraction(), 1.0);
    }
}
