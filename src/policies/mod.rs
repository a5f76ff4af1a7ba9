//! Restart policy knobs.
//!
//! This module groups the types that control **whether and when** a worker
//! slot is relaunched after its process exits.
//!
//! ## Contents
//! - [`RestartRule`] — restart now / restart after a delay / never restart
//! - [`ExitRules`] — per-exit-code instruction map with optional fallback
//!
//! ## Quick wiring
//! ```text
//! Supervisor exit handling:
//!   ProcessEvent::Exit { code, .. }
//!      └─► RestartRule::decide_default(rules, code)
//!           ├─ Restart            → re-spawn now, same WorkerSettings
//!           ├─ DelayedRestart(d)  → re-spawn after d
//!           ├─ NoRestart          → slot stays vacant
//!           └─ Err(PolicyError)   → PolicyGap event, slot stays vacant
//! ```
//!
//! Restart storms are deliberately not throttled here: each exit triggers
//! exactly one decision. Backoff belongs to a policy extension, not to the
//! default rules.

mod restart;

pub use restart::{ExitRules, RestartRule};
