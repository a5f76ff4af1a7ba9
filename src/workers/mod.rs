//! Pool declaration and per-slot settings.
//!
//! ## Contents
//! - [`PoolDecl`], [`WorkerKind`] — the declarative pool structure
//! - [`WorkerSettings`], [`Transport`] — immutable per-slot configuration
//!
//! `PoolDecl::expand()` is the only constructor of [`WorkerSettings`];
//! the expanded slot count is the supervisor's expected pool size.

mod settings;

pub use settings::{PoolDecl, Transport, WorkerKind, WorkerSettings};
