//! Clock utilities for the marquee cadence
//!
//! The marquee has no timers of its own. The host feeds elapsed time into an
//! [`Interval`], which reports when a full period has passed.

use std::time::Duration;

/// Repeating cadence advanced by an external clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Time accumulated toward the next firing
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advance the clock, returning true when the interval fires.
    ///
    /// Fires at most once per call; a backlog longer than one period
    /// (e.g. after the host stalled) is dropped instead of replayed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed < self.period {
            return false;
        }

        self.elapsed -= self.period;
        if self.elapsed >= self.period {
            self.elapsed = Duration::ZERO;
        }
        true
    }
}

/// Move `current` toward `target` by at most `step`, never past it
#[inline]
pub fn step_toward(current: u32, target: u32, step: u32) -> u32 {
    current.saturating_add(step).min(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_after_period() {
        let mut interval = Interval::new(Duration::from_millis(100));
        assert!(!interval.advance(Duration::from_millis(60)));
        assert!(interval.advance(Duration::from_millis(60)));
        assert_eq!(interval.elapsed(), Duration::from_millis(20));
    }

    #[test]
    fn test_interval_drops_backlog() {
        let mut interval = Interval::new(Duration::from_millis(100));
        assert!(interval.advance(Duration::from_millis(450)));
        assert_eq!(interval.elapsed(), Duration::ZERO);
        assert!(!interval.advance(Duration::from_millis(10)));
    }

    #[test]
    fn test_zero_period_fires_every_advance() {
        let mut interval = Interval::new(Duration::ZERO);
        assert!(interval.advance(Duration::ZERO));
        assert!(interval.advance(Duration::from_millis(5)));
    }

    #[test]
    fn test_step_toward() {
        assert_eq!(step_toward(0, 10, 3), 3);
        assert_eq!(step_toward(9, 10, 3), 10);
        assert_eq!(step_toward(12, 10, 3), 10);
    }
}
