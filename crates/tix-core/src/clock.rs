#![forbid(unsafe_code)]

//! Monotonic time sources.
//!
//! Everything that waits (the search debounce in particular) reads time
//! through [`Clock`] instead of calling `Instant::now()` directly:
//!
//! - [`WallClock`] measures real elapsed time. It is backed by `web-time`, so
//!   it works unchanged on `wasm32-unknown-unknown`.
//! - [`DeterministicClock`] only moves when the host (or a test) advances it.
//!
//! Times are expressed as a [`Duration`] since the clock's origin.

use core::time::Duration;

use web_time::Instant;

/// Source of monotonic time.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Real clock anchored at its construction instant.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    /// Start a clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock controlled entirely by its owner.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Advance by `ms` milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for DeterministicClock {
    fn now(&self) -> Duration {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_clock_starts_at_zero() {
        assert_eq!(DeterministicClock::new().now(), Duration::ZERO);
    }

    #[test]
    fn deterministic_clock_advances_and_sets() {
        let mut clock = DeterministicClock::new();
        clock.advance_ms(120);
        clock.advance(Duration::from_millis(30));
        assert_eq!(clock.now(), Duration::from_millis(150));

        clock.set(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn deterministic_clock_saturates() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::MAX);
        clock.advance_ms(1);
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn wall_clock_is_monotonic() {
        let clock = WallClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn clock_by_reference() {
        fn read(clock: impl Clock) -> Duration {
            clock.now()
        }
        let mut clock = DeterministicClock::new();
        clock.advance_ms(5);
        assert_eq!(read(&clock), Duration::from_millis(5));
    }
}
