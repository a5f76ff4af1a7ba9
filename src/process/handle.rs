//! # Process handles and the spawn collaborator seam.
//!
//! The supervisor never talks to the OS directly; it requests workers from
//! a [`Spawn`] implementation and afterwards only sees:
//!
//! - [`ProcessHandle`] — an opaque handle used to send IPC messages;
//! - [`ProcessEvent`] — inbound messages and exit notifications, delivered
//!   globally (one channel for the whole pool, not per handle).
//!
//! The default implementation is [`OsSpawner`](crate::OsSpawner); tests use
//! in-memory spawners.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::RuntimeConfig;
use crate::error::SpawnError;
use crate::workers::WorkerSettings;

/// Allocator for process handle identities.
static HANDLE_SEQ: AtomicU64 = AtomicU64::new(1);

/// Identity of a spawned worker process.
///
/// Unique per spawn within this supervisor process; a restarted slot gets a
/// fresh id. Used as the fork-registry key so the registry tolerates
/// lookups for handles that were already removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

impl HandleId {
    /// Allocates the next handle id.
    pub fn next() -> Self {
        Self(HANDLE_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to a spawned worker plus its outbound IPC channel.
///
/// Cloning is cheap; all clones refer to the same worker. Sends are
/// best-effort: once the worker's channel closes, messages are silently
/// dropped (the exit notification is the authoritative signal).
#[derive(Clone, Debug)]
pub struct ProcessHandle {
    id: HandleId,
    pid: Option<u32>,
    tx: mpsc::UnboundedSender<Value>,
}

impl ProcessHandle {
    /// Creates a handle around an outbound message channel.
    ///
    /// `pid` is the OS process id when known (mock spawners pass `None`).
    pub fn new(pid: Option<u32>, tx: mpsc::UnboundedSender<Value>) -> Self {
        Self {
            id: HandleId::next(),
            pid,
            tx,
        }
    }

    /// Returns the handle identity.
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Returns the OS process id, if known.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Sends a message to the worker, best-effort.
    ///
    /// A send to a closed channel is not retried and is not an error: the
    /// worker is either exiting (an `Exit` event is on its way) or already
    /// removed.
    pub fn send(&self, message: Value) {
        let _ = self.tx.send(message);
    }
}

/// Events flowing from workers back to the supervisor.
///
/// Delivered on a single channel for the whole pool; the supervisor's
/// control loop consumes them strictly one at a time, in arrival order.
#[derive(Clone, Debug)]
pub enum ProcessEvent {
    /// A worker sent an IPC message.
    Message {
        /// Handle the message arrived from.
        from: HandleId,
        /// Verbatim payload; relayed unchanged to the other workers.
        payload: Value,
    },
    /// A worker terminated.
    Exit {
        /// Handle of the dead worker.
        handle: HandleId,
        /// Exit code; for signal deaths the conventional `128 + signo`.
        code: i32,
        /// Terminating signal number, if the worker was killed by one.
        signal: Option<i32>,
    },
}

/// The spawn collaborator: creates worker processes and wires their IPC.
///
/// Implementations must, for every spawned worker:
/// - deliver inbound worker messages as [`ProcessEvent::Message`];
/// - deliver exactly one [`ProcessEvent::Exit`] when the process dies;
/// - route the returned handle's `send` to the worker.
#[async_trait]
pub trait Spawn: Send + Sync + 'static {
    /// Spawns one worker for `settings` with the derived runtime config.
    ///
    /// `events` is the pool-global event channel; the implementation keeps
    /// a clone for as long as the worker lives.
    async fn spawn(
        &self,
        settings: &WorkerSettings,
        config: &RuntimeConfig,
        events: mpsc::UnboundedSender<ProcessEvent>,
    ) -> Result<ProcessHandle, SpawnError>;
}
