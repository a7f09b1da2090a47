//! Debounced re-render scheduling.
//!
//! The generator holds at most one pending render. Every trigger moves the
//! deadline to `now + wait`, so a burst of mutations collapses into one
//! render once the burst has been quiet for the whole window.

use std::time::{Duration, Instant};

/// Default debounce window.
pub const RENDER_WAIT: Duration = Duration::from_millis(150);

/// A single cancellable deferred task, identified by its deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Arm (or re-arm) the task at `now + wait`, replacing any pending one.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending task if its deadline has passed at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RENDER_WAIT)
    }
}
