//! Time source for post creation and load-time coercion.

use std::cell::Cell;

use chrono::Utc;

/// Supplies the current time in epoch milliseconds.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that reports a settable instant. Used by tests and scripted runs.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    /// Create a clock frozen at `now` milliseconds.
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Move the clock to `now` milliseconds.
    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
