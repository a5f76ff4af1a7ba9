//! # Pool declaration and per-slot worker settings.
//!
//! A pool is declared as an ordered list of worker *kinds*; each kind names
//! an executable and how many copies to run. [`PoolDecl::expand`] flattens
//! the declaration into one [`WorkerSettings`] per slot, assigning ordinal
//! slot ids `1..=N` across all kinds in declaration order.
//!
//! Settings are immutable after expansion and shared as
//! `Arc<WorkerSettings>`: a restarted slot reuses exactly the settings it
//! was first launched with.
//!
//! ## Example
//! ```rust
//! use forkvisor::{PoolDecl, WorkerKind};
//!
//! let decl = PoolDecl::new(vec![
//!     WorkerKind::new("ingest.bin").count(2),
//!     WorkerKind::new("index.bin"),
//! ]);
//! let slots = decl.expand();
//!
//! assert_eq!(slots.len(), 3);
//! assert_eq!(slots[0].slot, 1);
//! assert_eq!(slots[2].slot, 3);
//! assert!(slots[2].exec.ends_with("index.bin"));
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

/// Transport parameters a kind may override on top of the pool defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Transport {
    /// Overrides [`RuntimeDefaults::port`](crate::RuntimeDefaults::port).
    #[serde(default)]
    pub port: Option<u16>,
    /// Overrides [`RuntimeDefaults::no_delay`](crate::RuntimeDefaults::no_delay).
    #[serde(default)]
    pub no_delay: Option<bool>,
}

/// One entry of the pool declaration: a worker kind and its multiplicity.
///
/// Loading a declaration from a file or the environment stays outside this
/// crate; `Deserialize` is derived so callers can do that with their own
/// tooling.
#[derive(Clone, Debug, Deserialize)]
pub struct WorkerKind {
    /// Executable (or entry reference) to launch for every slot of this kind.
    pub exec: PathBuf,
    /// Number of slots to expand this kind into.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Transport overrides for this kind.
    #[serde(default)]
    pub transport: Transport,
    /// Send the worker its assigned slot id right after launch.
    #[serde(default)]
    pub send_slot: bool,
    /// Arbitrary startup message sent right after launch (and after each
    /// restart), if set.
    #[serde(default)]
    pub start_message: Option<Value>,
}

fn default_count() -> u32 {
    1
}

impl WorkerKind {
    /// Creates a kind with `count = 1` and no startup directives.
    pub fn new(exec: impl Into<PathBuf>) -> Self {
        Self {
            exec: exec.into(),
            count: 1,
            transport: Transport::default(),
            send_slot: false,
            start_message: None,
        }
    }

    /// Sets the number of slots for this kind.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets transport overrides.
    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Requests the slot id be sent to the worker on every launch.
    pub fn send_slot(mut self) -> Self {
        self.send_slot = true;
        self
    }

    /// Sets the startup message sent to the worker on every launch.
    pub fn start_message(mut self, message: Value) -> Self {
        self.start_message = Some(message);
        self
    }
}

/// Ordered pool declaration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PoolDecl {
    /// Worker kinds, in declaration order (drives slot id assignment).
    pub kinds: Vec<WorkerKind>,
}

impl PoolDecl {
    pub fn new(kinds: Vec<WorkerKind>) -> Self {
        Self { kinds }
    }

    /// Expands the declaration into per-slot settings.
    ///
    /// Slot ids are ordinal (1-based) across all kinds, in declaration
    /// order; the expanded count is the pool's expected size.
    pub fn expand(&self) -> Vec<Arc<WorkerSettings>> {
        let mut slots = Vec::new();
        let mut slot = 0u32;

        for kind in &self.kinds {
            for _ in 0..kind.count {
                slot += 1;
                slots.push(Arc::new(WorkerSettings {
                    slot,
                    exec: kind.exec.clone(),
                    transport: kind.transport.clone(),
                    send_slot: kind.send_slot,
                    start_message: kind.start_message.clone(),
                }));
            }
        }
        slots
    }
}

/// Immutable per-slot configuration, fixed at pool construction.
///
/// A slot keeps its identity across restarts: the supervisor relaunches a
/// dead worker from the very same `WorkerSettings`.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerSettings {
    /// Ordinal slot id (1-based).
    pub slot: u32,
    /// Executable to launch.
    pub exec: PathBuf,
    /// Resolved transport overrides for this slot's kind.
    pub transport: Transport,
    /// Send the worker its slot id after launch.
    pub send_slot: bool,
    /// Startup message sent after launch, if any.
    pub start_message: Option<Value>,
}
