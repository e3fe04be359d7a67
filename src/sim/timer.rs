//! Wall-clock countdowns, advanced by real elapsed time rather than ticks

use std::time::Duration;

/// One-shot timer. Fires exactly once when the accumulated time reaches its delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
    fired: bool,
}

impl Countdown {
    pub fn new(delay: Duration) -> Self {
        Self {
            remaining: delay,
            fired: false,
        }
    }

    /// Consume `elapsed` real time. Returns true on the call that reaches zero.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let mut c = Countdown::new(Duration::from_millis(500));
        assert!(!c.advance(Duration::from_millis(200)));
        assert!(!c.advance(Duration::from_millis(299)));
        assert!(c.advance(Duration::from_millis(1)));
        assert!(!c.advance(Duration::from_millis(1000)));
    }

    #[test]
    fn test_overshoot_fires() {
        let mut c = Countdown::new(Duration::from_millis(500));
        assert!(c.advance(Duration::from_secs(3)));
        assert!(!c.advance(Duration::ZERO));
    }

    #[test]
    fn test_zero_delay_fires_on_first_advance() {
        let mut c = Countdown::new(Duration::ZERO);
        assert!(c.advance(Duration::ZERO));
    }
}
