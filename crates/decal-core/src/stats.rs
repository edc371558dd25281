/// Smoothed frame statistics for the on-screen overlay.
///
/// Fed with the elapsed time of each frame by the front-end's clock, so the
/// core stays free of platform timers.
#[derive(Clone, Debug)]
pub struct FrameStats {
    smoothed_fps: f32,
    /// Weight of the newest sample (lower = smoother).
    smoothing: f32,
    frame_ms: f32,
    frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl FrameStats {
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothed_fps: 60.0,
            smoothing: smoothing.clamp(0.0, 1.0),
            frame_ms: 0.0,
            frames: 0,
        }
    }

    /// Record one frame that took `dt_sec` seconds.
    pub fn record(&mut self, dt_sec: f32) {
        self.frames += 1;
        if !(dt_sec > 0.0 && dt_sec.is_finite()) {
            return;
        }
        self.frame_ms = dt_sec * 1000.0;
        let instant_fps = 1.0 / dt_sec;
        self.smoothed_fps =
            self.smoothed_fps * (1.0 - self.smoothing) + instant_fps * self.smoothing;
    }

    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Duration of the last recorded frame in milliseconds.
    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Overlay text, e.g. `"60 fps (16.7 ms)"`.
    pub fn label(&self) -> String {
        format!("{:.0} fps ({:.1} ms)", self.smoothed_fps, self.frame_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_toward_steady_rate() {
        let mut s = FrameStats::default();
        for _ in 0..500 {
            s.record(1.0 / 30.0);
        }
        assert!((s.fps() - 30.0).abs() < 0.1);
        assert!((s.frame_ms() - 33.333).abs() < 0.01);
        assert_eq!(s.frames(), 500);
        assert_eq!(s.label(), "30 fps (33.3 ms)");
    }

    #[test]
    fn zero_and_nan_durations_are_skipped() {
        let mut s = FrameStats::default();
        s.record(0.0);
        s.record(f32::NAN);
        assert_eq!(s.fps(), 60.0);
        assert_eq!(s.frames(), 2);
    }
}
