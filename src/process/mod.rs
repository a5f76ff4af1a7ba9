//! Spawn collaborator boundary: handles, events, and the default OS spawner.
//!
//! ## Contents
//! - [`Spawn`] — the trait the supervisor spawns workers through
//! - [`ProcessHandle`], [`HandleId`] — opaque handle + identity
//! - [`ProcessEvent`] — inbound messages and exit notifications
//! - [`OsSpawner`] — default implementation over `tokio::process`
//!
//! The supervisor stays testable because everything OS-specific lives
//! behind [`Spawn`]; loop-level tests plug in an in-memory spawner.

mod handle;
mod os;

pub use handle::{HandleId, ProcessEvent, ProcessHandle, Spawn};
pub use os::{OsSpawner, WORKER_CONFIG_ENV};
