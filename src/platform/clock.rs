//! Fixed-rate frame limiter
//!
//! Display refresh runs at whatever the screen offers (60, 90, 120 Hz...).
//! The simulation advances one tick per accepted frame, and frames arriving
//! sooner than one interval after the last accepted one are skipped.

use crate::consts::TICK_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    /// Timestamp the last accepted frame is aligned to
    last_ms: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl FrameClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Should the frame at `now_ms` tick and render?
    ///
    /// The remainder past a whole interval is carried into the next frame
    /// so the average rate does not drift below the target.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let last = *self.last_ms.get_or_insert(now_ms - self.interval_ms);
        let delta = now_ms - last;
        if delta < self.interval_ms {
            return false;
        }
        self.last_ms = Some(now_ms - delta % self.interval_ms);
        true
    }

    /// Forget the last frame (after a pause or a restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
