//! Debounced saving
//!
//! Save requests arm a single-slot [`SaveTimer`]; re-arming replaces the
//! previous deadline so a burst of edits produces one save. While a
//! [`SaveGuard`] is alive no timer can be armed.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for driving the debounce deterministically
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A cancellable one-shot deadline
#[derive(Clone, Copy, Debug, Default)]
pub struct SaveTimer {
    deadline: Option<Instant>,
}

impl SaveTimer {
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Cancel any pending deadline, then arm a new one
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.cancel();
        self.deadline = Some(now + delay);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Disarm and report whether the deadline had passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.cancel();
            return true;
        }
        false
    }
}

/// Scoped save suppression
///
/// Suppression is reference counted, so guards nest. Dropping the last guard
/// re-enables saving.
#[must_use = "saves are only suppressed while the guard is alive"]
#[derive(Debug)]
pub struct SaveGuard {
    depth: Rc<Cell<u32>>,
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Debounce timer plus suppression counter
#[derive(Debug)]
pub(crate) struct SaveScheduler {
    timer: SaveTimer,
    depth: Rc<Cell<u32>>,
    delay: Duration,
}

impl SaveScheduler {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            timer: SaveTimer::default(),
            depth: Rc::new(Cell::new(0)),
            delay,
        }
    }

    pub(crate) fn is_suppressed(&self) -> bool {
        self.depth.get() > 0
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Cancel the pending save and start suppressing
    pub(crate) fn suppress(&mut self) -> SaveGuard {
        self.timer.cancel();
        self.depth.set(self.depth.get() + 1);
        SaveGuard {
            depth: Rc::clone(&self.depth),
        }
    }

    /// Arm the timer unless suppressed; returns whether it was armed
    pub(crate) fn request(&mut self, now: Instant) -> bool {
        if self.is_suppressed() {
            return false;
        }
        self.timer.arm(now, self.delay);
        true
    }

    pub(crate) fn take_due(&mut self, now: Instant) -> bool {
        !self.is_suppressed() && self.timer.take_due(now)
    }

    /// Disarm a pending save regardless of its deadline
    pub(crate) fn take_pending(&mut self) -> bool {
        if self.is_suppressed() || !self.timer.is_armed() {
            return false;
        }
        self.timer.cancel();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_rearm_replaces_deadline() {
        let clock = ManualClock::new();
        let mut timer = SaveTimer::default();

        timer.arm(clock.now(), DELAY);
        clock.advance(Duration::from_millis(60));
        timer.arm(clock.now(), DELAY);
        clock.advance(Duration::from_millis(60));
        assert!(!timer.is_due(clock.now()));

        clock.advance(Duration::from_millis(40));
        assert!(timer.take_due(clock.now()));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_suppression_nests() {
        let mut saves = SaveScheduler::new(DELAY);
        let outer = saves.suppress();
        let inner = saves.suppress();

        drop(inner);
        assert!(saves.is_suppressed());
        assert!(!saves.request(Instant::now()));

        drop(outer);
        assert!(!saves.is_suppressed());
        assert!(saves.request(Instant::now()));
    }

    #[test]
    fn test_suppress_cancels_pending() {
        let clock = ManualClock::new();
        let mut saves = SaveScheduler::new(DELAY);
        saves.request(clock.now());

        let guard = saves.suppress();
        assert!(!saves.is_pending());
        drop(guard);

        clock.advance(DELAY);
        assert!(!saves.take_due(clock.now()));
    }
}
