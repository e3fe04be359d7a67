//! Frame timing
//!
//! The simulation advances one tick per frame; only the game-over delay runs
//! on real time. `FrameClock` turns host timestamps (milliseconds) into that
//! elapsed time.

use std::time::Duration;

/// Longest gap reported for a single frame (tab switches, debugger pauses)
const MAX_FRAME_GAP: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Real time since the previous frame. Zero on the first frame.
    pub fn frame(&mut self, now_ms: f64) -> Duration {
        let elapsed = match self.last_ms {
            Some(last) if now_ms > last => Duration::from_secs_f64((now_ms - last) / 1000.0),
            _ => Duration::ZERO,
        };
        self.last_ms = Some(now_ms);
        elapsed.min(MAX_FRAME_GAP)
    }
}

/// Rolling frames-per-second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot about to be overwritten holds the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(1000.0), Duration::ZERO);
        assert_eq!(clock.frame(1016.0), Duration::from_millis(16));
    }

    #[test]
    fn test_gaps_are_clamped() {
        let mut clock = FrameClock::new();
        clock.frame(0.5);
        assert_eq!(clock.frame(10_000.0), MAX_FRAME_GAP);
    }

    #[test]
    fn test_time_going_backwards_is_zero() {
        let mut clock = FrameClock::new();
        clock.frame(500.0);
        assert_eq!(clock.frame(400.0), Duration::ZERO);
    }

    #[test]
    fn test_fps_at_steady_rate() {
        let mut fps = FpsCounter::new();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
