//! Frame timing for the scene animation loop

use std::time::{Duration, Instant};

/// Longest step fed to the animation in one frame
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Tracks per-frame delta and total elapsed animation time
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Call once per frame to update timing from the wall clock
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Step the timer by a fixed amount (headless runs and tests)
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta.min(MAX_FRAME_DELTA);
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get delta time as Duration
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total animation time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut timer = FrameTimer::new();
        timer.advance(Duration::from_millis(16));
        timer.advance(Duration::from_millis(16));
        assert_eq!(timer.frame_count(), 2);
        assert!((timer.elapsed_secs() - 0.032).abs() < 1e-6);
        assert!((timer.delta_secs() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_advance_clamps_long_frames() {
        let mut timer = FrameTimer::new();
        timer.advance(Duration::from_secs(5));
        assert_eq!(timer.delta(), MAX_FRAME_DELTA);
        assert_eq!(timer.elapsed_secs(), MAX_FRAME_DELTA.as_secs_f32());
    }
}
