//! # Event subscribers for the forkvisor runtime.
//!
//! Provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out, and a
//! built-in stdout [`LogWriter`] for development and demos.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   control loop ── publish(Event) ──► Bus ──► subscriber_listener
//!                                                  │
//!                                            SubscriberSet::emit
//!                                       ┌──────────┼──────────┐
//!                                       ▼          ▼          ▼
//!                                   LogWriter   Metrics    Custom ...
//! ```

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
