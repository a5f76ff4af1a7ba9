//! # Runtime events emitted by the supervisor.
//!
//! The [`EventKind`] enum classifies events across four categories:
//! - **Lifecycle events**: worker spawn/exit flow
//! - **Restart events**: decisions taken by the exit rules
//! - **Pool events**: the debounced readiness flag flipping
//! - **Subscriber events**: fan-out overflow/panic reports
//!
//! The [`Event`] struct carries metadata such as timestamps, slot ids,
//! process ids, exit codes, and restart delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of order by independent subscribers.
//!
//! ## Example
//! ```rust
//! use forkvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::WorkerExited)
//!     .with_slot(3)
//!     .with_pid(4242)
//!     .with_exit_code(137)
//!     .with_signal(9);
//!
//! assert_eq!(ev.kind, EventKind::WorkerExited);
//! assert_eq!(ev.slot, Some(3));
//! assert_eq!(ev.exit_code, Some(137));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `reason` (subscriber name + panic info), `at`, `seq`.
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `reason` (subscriber name + cause), `at`, `seq`.
    SubscriberOverflow,

    // === Worker lifecycle events ===
    /// A worker process was spawned and registered.
    ///
    /// Sets: `slot`, `pid` (if known), `at`, `seq`.
    WorkerSpawned,

    /// A registered worker terminated.
    ///
    /// Sets: `slot`, `pid`, `exit_code`, `signal` (if killed by one),
    /// `at`, `seq`.
    WorkerExited,

    /// A restart-time spawn attempt failed; the slot is left vacant.
    ///
    /// Sets: `slot`, `reason`, `at`, `seq`.
    SpawnFailed,

    // === Restart decisions ===
    /// A delayed restart was scheduled for a slot.
    ///
    /// Sets: `slot`, `exit_code`, `delay_ms`, `at`, `seq`.
    RestartScheduled,

    /// The exit rules suppressed a restart; the slot stays vacant.
    ///
    /// Sets: `slot`, `exit_code`, `at`, `seq`.
    RestartSuppressed,

    /// The supplied instruction map had no rule for an exit code.
    ///
    /// This is a configuration error; the slot is not restarted.
    /// Sets: `slot`, `exit_code`, `reason`, `at`, `seq`.
    PolicyGap,

    // === Pool state ===
    /// The debounced readiness flag flipped.
    ///
    /// Emitted exactly once per flip. Sets: `ready` (new value), `at`, `seq`.
    PoolStateChanged,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Ordinal worker slot id, if applicable.
    pub slot: Option<u32>,
    /// OS process id, if known.
    pub pid: Option<u32>,
    /// Worker exit code.
    pub exit_code: Option<i32>,
    /// Terminating signal number, if the worker was killed by one.
    pub signal: Option<i32>,
    /// Scheduled restart delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// New readiness value (only for [`EventKind::PoolStateChanged`]).
    pub ready: Option<bool>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and
    /// next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            slot: None,
            pid: None,
            exit_code: None,
            signal: None,
            delay_ms: None,
            ready: None,
            reason: None,
        }
    }

    /// Attaches a worker slot id.
    #[inline]
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Attaches an OS process id.
    #[inline]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    /// Attaches an exit code.
    #[inline]
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Attaches a terminating signal number.
    #[inline]
    pub fn with_signal(mut self, signal: i32) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Attaches a restart delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches the new readiness value.
    #[inline]
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = Some(ready);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, cause: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} cause={cause}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} panic={info}"))
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}
