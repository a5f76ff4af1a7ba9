//! # Fork registry: the authoritative map of running workers.
//!
//! [`ForkRegistry`] maps a [`HandleId`] to the [`LaunchRecord`] it was
//! started with. Membership exactly mirrors "currently running, supervised
//! workers"; its size is the sole driver of pool readiness.
//!
//! ## Rules
//! - A handle appears at most once (`put` overwrites).
//! - `remove` is idempotent; exit notifications for already-removed handles
//!   are a no-op.
//! - The registry is owned exclusively by the supervisor's control loop, so
//!   it needs no interior locking — no task other than that loop ever
//!   touches it.
//! - Iteration visits every current member exactly once, in no particular
//!   order; it is used only for message fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use crate::process::{HandleId, ProcessHandle};
use crate::workers::WorkerSettings;

/// A live worker handle paired with the settings it was launched from.
///
/// Created on successful spawn, destroyed when exit handling removes the
/// entry. The settings are what a restart of this slot will reuse.
#[derive(Clone, Debug)]
pub struct LaunchRecord {
    /// Handle to the running process.
    pub handle: ProcessHandle,
    /// Immutable settings the process was launched with.
    pub settings: Arc<WorkerSettings>,
}

/// In-memory mapping from handle identity to launch record.
#[derive(Debug, Default)]
pub struct ForkRegistry {
    entries: HashMap<HandleId, LaunchRecord>,
}

impl ForkRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for a handle.
    pub fn put(&mut self, record: LaunchRecord) {
        self.entries.insert(record.handle.id(), record);
    }

    /// Returns the record for a handle, tolerating absent ids.
    pub fn get(&self, id: HandleId) -> Option<&LaunchRecord> {
        self.entries.get(&id)
    }

    /// Removes and returns the entry, if present (no-op otherwise).
    pub fn remove(&mut self, id: HandleId) -> Option<LaunchRecord> {
        self.entries.remove(&id)
    }

    /// Current count of running, supervised workers.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Visits every current member exactly once (fan-out only).
    pub fn iter(&self) -> impl Iterator<Item = (&HandleId, &LaunchRecord)> {
        self.entries.iter()
    }
}
