//! Frame delta timing
//!
//! The display refresh callback carries a monotonic timestamp in
//! milliseconds. The first frame after a (re)start only establishes the
//! baseline.

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the baseline; the next frame yields no delta
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Milliseconds since the previous frame, or None on the first frame
    pub fn delta(&mut self, timestamp: f64) -> Option<f32> {
        let dt = self.last.map(|last| (timestamp - last).max(0.0) as f32);
        self.last = Some(timestamp);
        dt
    }
}
