//! Frame delta measurement

/// Turns frame timestamps into simulation deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    reference_ms: f32,
    max_ms: f32,
}

impl FrameClock {
    pub fn new(reference_ms: f32, max_ms: f32) -> Self {
        Self {
            last_time: None,
            reference_ms,
            max_ms,
        }
    }

    /// Milliseconds since the previous frame, capped at `max_ms`.
    ///
    /// The first frame after construction or [`FrameClock::restart`] has no
    /// previous timestamp and counts as one reference frame.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last).max(0.0) as f32).min(self.max_ms),
            None => self.reference_ms,
        };
        self.last_time = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (after a pause, reset or stalled loop)
    pub fn restart(&mut self) {
        self.last_time = None;
    }
}
