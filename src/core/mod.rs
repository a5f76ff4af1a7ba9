//! Runtime core: pool bookkeeping and the supervisor control loop.
//!
//! The only public API from this module is [`Supervisor`] and its
//! [`SupervisorBuilder`]; the collaborators it composes stay internal.
//!
//! Internal modules:
//! - [`registry`]: authoritative map of running workers;
//! - [`readiness`]: debounced pool-ready state machine;
//! - [`logsink`]: lazily-opened append-only exit log;
//! - [`supervisor`]: the single control loop (launch, relay, exit handling);
//! - [`builder`]: wiring of bus, subscribers, and spawner.

mod builder;
mod logsink;
mod readiness;
mod registry;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use supervisor::Supervisor;
