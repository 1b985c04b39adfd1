#![forbid(unsafe_code)]

//! Trailing-edge debounce timer.
//!
//! [`DebounceTimer`] holds at most one pending deadline. Every call to
//! [`schedule`](DebounceTimer::schedule) replaces the previous deadline, so a
//! burst of edits yields a single expiry `delay` after the last one.
//!
//! The timer never reads a clock on its own. The owner passes the current
//! time in, which keeps it usable on hosts without threads or timers and makes
//! it trivially testable with a [`DeterministicClock`](crate::DeterministicClock).
//!
//! # Usage
//!
//! ```
//! use core::time::Duration;
//! use tix_core::DebounceTimer;
//!
//! let mut timer = DebounceTimer::new(Duration::from_millis(100));
//! timer.schedule(Duration::from_millis(0));
//! timer.schedule(Duration::from_millis(60)); // restarts the window
//!
//! assert!(!timer.poll(Duration::from_millis(100)));
//! assert!(timer.poll(Duration::from_millis(160)));
//! assert!(!timer.is_pending());
//! ```

use core::time::Duration;

/// A cancellable, restartable deadline.
///
/// Not thread-safe; owned by a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl DebounceTimer {
    /// Create an idle timer with the given window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The debounce window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the window is zero (commits are synchronous).
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }

    /// Cancel any pending deadline and start a new window at `now`.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until expiry, `None` when idle.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    /// Consume the deadline if it has expired at `now`.
    ///
    /// Returns `true` exactly once per scheduled window.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
