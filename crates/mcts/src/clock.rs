//! Time sources for the search budget.
//!
//! The engine only ever asks "how much time has passed", so tests can swap
//! the wall clock for a simulated one and get reproducible searches.

use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&mut self) -> Duration;
}

/// Wall-clock time from `std::time::Instant`.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Simulated time that advances by a fixed step on every read.
///
/// A search with budget `B` and step `S` completes exactly `ceil(B / S) - 1`
/// cycles regardless of how fast the machine is.
#[derive(Clone, Debug)]
pub struct SteppingClock {
    current: Duration,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            current: Duration::ZERO,
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&mut self) -> Duration {
        let now = self.current;
        self.current = self.current.saturating_add(self.step);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_clock_advances_per_read() {
        let mut clock = SteppingClock::new(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(20));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
