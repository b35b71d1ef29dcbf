//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Turns animation timestamps into clamped frame deltas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    /// Start the clock at `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self { last_ms: start_ms }
    }

    /// Seconds since the previous timestamp, clamped to [0, MAX_FRAME_DT]
    ///
    /// Long stalls (hidden tab, debugger) would otherwise move the light in
    /// one large jump. Timestamps going backwards give a zero delta.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = ((timestamp_ms - self.last_ms) / 1000.0) as f32;
        self.last_ms = timestamp_ms;
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }
}
