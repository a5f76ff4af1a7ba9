//! # forkvisor
//!
//! **Forkvisor** is a worker-process pool supervisor for Rust.
//!
//! It launches a fixed pool of child workers, tracks their liveness,
//! restarts them when they terminate (optionally per exit code), relays
//! inter-worker messages, and exposes a debounced "pool ready" signal once
//! the expected number of workers is simultaneously alive.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  WorkerKind  │   │  WorkerKind  │   │  WorkerKind  │
//!     │ (exec × n)   │   │ (exec × n)   │   │ (exec × n)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            └────────── PoolDecl::expand ─────────┘
//!                             │  one WorkerSettings per slot (ids 1..N)
//!                             ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor (single control loop)                                 │
//! │  - ForkRegistry (authoritative map of running workers)            │
//! │  - ReadinessTracker (debounced pool-ready state machine)          │
//! │  - ExitRules (per-exit-code restart decisions)                    │
//! │  - ErrorLog (append-only exit records)                            │
//! │  - Bus (broadcast events) + SubscriberSet (fan-out)               │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼ Spawn::spawn     ▼                  ▼
//!   ┌──────────┐      ┌──────────┐       ┌──────────┐
//!   │ worker 1 │      │ worker 2 │  ...  │ worker N │   (OS processes)
//!   └────┬─────┘      └────┬─────┘       └────┬─────┘
//!        │  ProcessEvent::Message / ProcessEvent::Exit
//!        └───────────► one global channel ───────────► control loop
//! ```
//!
//! ## Lifecycle
//! ```text
//! run(decl, rules):
//!   expand decl → launch every slot → register → (send slot id / start msg)
//!   loop {
//!     Message{from, payload} → relay to every other worker (sender excluded)
//!     Exit{handle, code, signal} →
//!        remove from registry            (readiness degrades immediately)
//!        append error-log line
//!        decide(rules, code):
//!          Restart → relaunch now, same settings
//!          DelayedRestart(d) → relaunch after d
//!          NoRestart → slot stays vacant
//!          gap → PolicyGap event, slot stays vacant
//!     debounce fire → re-validate pool still full → Ready
//!   }
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types                               |
//! |-----------------|----------------------------------------------------------|-----------------------------------------|
//! | **Pool**        | Declare worker kinds and counts, expand into slots.      | [`PoolDecl`], [`WorkerKind`], [`WorkerSettings`] |
//! | **Policies**    | Per-exit-code restart instructions.                      | [`ExitRules`], [`RestartRule`]          |
//! | **Spawning**    | OS processes behind a trait seam, mockable in tests.     | [`Spawn`], [`OsSpawner`], [`ProcessHandle`] |
//! | **Readiness**   | Debounced pool-ready flag, immediate degrade.            | [`Supervisor::readiness`]               |
//! | **Subscribers** | Hook into runtime events (logging, metrics, custom).     | [`Subscribe`], [`LogWriter`]            |
//! | **Errors**      | Typed errors for spawning, policy gaps, and the runtime. | [`SpawnError`], [`PolicyError`], [`RuntimeError`] |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use forkvisor::{
//!     ExitRules, LogWriter, PoolConfig, PoolDecl, RestartRule, Subscribe,
//!     SupervisorBuilder, WorkerKind,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = PoolConfig::default();
//!     cfg.debounce = Duration::from_millis(500);
//!
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let sup = SupervisorBuilder::new(cfg).with_subscribers(subs).build();
//!
//!     let decl = PoolDecl::new(vec![
//!         WorkerKind::new("./ingest-worker").count(2).send_slot(),
//!         WorkerKind::new("./index-worker"),
//!     ]);
//!     let rules = ExitRules::new()
//!         .with_rule(137, RestartRule::NoRestart)
//!         .with_fallback(RestartRule::Restart);
//!
//!     let mut ready = sup.readiness();
//!     tokio::spawn(async move {
//!         while ready.changed().await.is_ok() {
//!             println!("pool ready: {}", *ready.borrow());
//!         }
//!     });
//!
//!     sup.run(decl, Some(rules)).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod policies;
mod process;
mod subscribers;
mod workers;

// ---- Public re-exports ----

pub use config::{PoolConfig, RuntimeConfig, RuntimeDefaults};
pub use crate::core::{Supervisor, SupervisorBuilder};
pub use error::{PolicyError, RuntimeError, SpawnError};
pub use events::{Bus, Event, EventKind};
pub use policies::{ExitRules, RestartRule};
pub use process::{HandleId, OsSpawner, ProcessEvent, ProcessHandle, Spawn, WORKER_CONFIG_ENV};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use workers::{PoolDecl, Transport, WorkerKind, WorkerSettings};
