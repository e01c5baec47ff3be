//! Time source and the recurring timer handle used by the simulator.

use std::time::{Duration, Instant};

/// Source of "now" for the simulator.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: std::rc::Rc::new(std::cell::Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A recurring timer owned by whoever polls it.
///
/// Dropping the value cancels it. A caller that polls late gets a single
/// firing, and the next one is scheduled a full period after that poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// Schedule the first firing one `period` after `now`.
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns `true` (and reschedules) when the ticker is due at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }
}
