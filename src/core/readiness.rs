//! # Debounced pool readiness state machine.
//!
//! [`ReadinessTracker`] derives one boolean from `registry.size()` versus
//! the expected worker count:
//!
//! ```text
//! NotReady ──(size == expected)──► arm debounce timer ──(fire, still full)──► Ready
//!    ▲                                                                          │
//!    └───────────────(size != expected, immediate, no debounce)─────────────────┘
//! ```
//!
//! ## Rules
//! - The false→true transition is the only debounced one: the pool must
//!   stay full for the whole window before Ready is reported.
//! - Any shrink flips Ready→NotReady synchronously, in the same control
//!   loop turn.
//! - Insertions that keep the size at `expected` do not re-arm the timer;
//!   insertions below `expected` do nothing.
//! - A timer fire **re-validates** its precondition instead of trusting it:
//!   each arm gets a fresh epoch, and a fire with a stale epoch or a wrong
//!   size is a no-op. This closes the race where the pool shrank (and maybe
//!   refilled) after the timer was armed.
//!
//! The tracker itself never sleeps; it tells the caller *when* to arm a
//! timer and the caller's loop feeds the fire back in. That keeps the whole
//! state machine synchronous and unit-testable without a runtime.

use std::time::Duration;

/// What the caller must do after a size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessStep {
    /// Start the debounce timer; deliver `confirm(epoch)` when it fires.
    ArmTimer {
        /// Identifies this arm; stale fires are rejected.
        epoch: u64,
        /// Debounce window to sleep for.
        after: Duration,
    },
    /// Readiness flipped to the carried value; notify observers.
    Flipped(bool),
}

/// Debounced readiness state over the registry size.
#[derive(Debug)]
pub struct ReadinessTracker {
    expected: usize,
    debounce: Duration,
    ready: bool,
    /// Epoch of the most recent arm; bumped to invalidate pending timers.
    epoch: u64,
    /// Whether a debounce timer for the current epoch is outstanding.
    armed: bool,
}

impl ReadinessTracker {
    /// Creates a tracker in the NotReady state.
    pub fn new(expected: usize, debounce: Duration) -> Self {
        Self {
            expected,
            debounce,
            ready: false,
            epoch: 0,
            armed: false,
        }
    }

    /// Current readiness flag.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Expected pool size.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Recomputes state after a registry mutation.
    ///
    /// Returns at most one step for the caller to perform. Shrinks while
    /// Ready flip immediately; reaching `expected` while NotReady arms the
    /// debounce timer (once).
    pub fn on_size_change(&mut self, size: usize) -> Option<ReadinessStep> {
        if self.ready {
            if size != self.expected {
                self.ready = false;
                // Invalidate any stray timer; normally none is pending here.
                self.epoch += 1;
                self.armed = false;
                return Some(ReadinessStep::Flipped(false));
            }
            return None;
        }

        if size == self.expected {
            if self.armed {
                return None;
            }
            self.epoch += 1;
            self.armed = true;
            return Some(ReadinessStep::ArmTimer {
                epoch: self.epoch,
                after: self.debounce,
            });
        }

        // Below expected while a timer is pending: the arm condition no
        // longer holds, so supersede that timer.
        if self.armed {
            self.epoch += 1;
            self.armed = false;
        }
        None
    }

    /// Handles a debounce timer fire.
    ///
    /// Flips to Ready only when the epoch is current **and** the pool is
    /// still exactly full; anything else is a stale fire and a no-op.
    pub fn confirm(&mut self, epoch: u64, size: usize) -> Option<ReadinessStep> {
        if epoch != self.epoch || !self.armed {
            return None;
        }
        self.armed = false;

        if !self.ready && size == self.expected {
            self.ready = true;
            return Some(ReadinessStep::Flipped(true));
        }
        None
    }
}
