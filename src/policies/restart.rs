//! # Per-exit-code restart rules.
//!
//! [`RestartRule`] is what happens to a worker slot after its process
//! terminates; [`ExitRules`] maps exit codes to rules.
//!
//! - [`RestartRule::Restart`] — relaunch immediately with the same settings.
//! - [`RestartRule::DelayedRestart`] — relaunch after the given delay.
//! - [`RestartRule::NoRestart`] — leave the slot vacant permanently.
//!
//! ## Decision table
//! ```text
//! no map supplied                        → Restart (default)
//! map has entry for code                 → that entry
//! map has no entry, fallback defined     → fallback
//! map has no entry, no fallback          → PolicyError::UnmappedExitCode
//! ```
//!
//! A supplied map with a gap is a configuration error and fails loudly at
//! decision time instead of silently restarting; declare a fallback with
//! [`ExitRules::with_fallback`] to opt back into a default.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use forkvisor::{ExitRules, RestartRule};
//!
//! let rules = ExitRules::new()
//!     .with_rule(137, RestartRule::NoRestart)
//!     .with_rule(1, RestartRule::DelayedRestart(Duration::from_millis(500)))
//!     .with_fallback(RestartRule::Restart);
//!
//! assert_eq!(rules.decide(137).unwrap(), RestartRule::NoRestart);
//! assert_eq!(rules.decide(0).unwrap(), RestartRule::Restart);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::error::PolicyError;

/// What to do with a worker slot after its process exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestartRule {
    /// Relaunch immediately with the same [`WorkerSettings`](crate::WorkerSettings).
    Restart,
    /// Relaunch after the given delay elapses.
    DelayedRestart(Duration),
    /// Never relaunch; the slot stays vacant and the pool runs degraded.
    NoRestart,
}

/// Per-exit-code restart instruction map.
///
/// Read-only after construction; supplied once to
/// [`Supervisor::run`](crate::Supervisor::run). When no map is supplied at
/// all, every exit restarts immediately (see [`RestartRule::decide_default`]).
#[derive(Clone, Debug, Default)]
pub struct ExitRules {
    rules: HashMap<i32, RestartRule>,
    fallback: Option<RestartRule>,
}

impl ExitRules {
    /// Creates an empty instruction map.
    ///
    /// An empty map with no fallback makes *every* exit code a
    /// [`PolicyError::UnmappedExitCode`]; usually you want at least a
    /// fallback rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule for an exit code (overwrites a previous rule for it).
    pub fn with_rule(mut self, code: i32, rule: RestartRule) -> Self {
        self.rules.insert(code, rule);
        self
    }

    /// Sets the fallback rule used when an exit code has no entry.
    pub fn with_fallback(mut self, rule: RestartRule) -> Self {
        self.fallback = Some(rule);
        self
    }

    /// Decides the rule for an exit code.
    ///
    /// Returns [`PolicyError::UnmappedExitCode`] when neither an entry nor
    /// a fallback covers the code.
    pub fn decide(&self, code: i32) -> Result<RestartRule, PolicyError> {
        self.rules
            .get(&code)
            .copied()
            .or(self.fallback)
            .ok_or(PolicyError::UnmappedExitCode { code })
    }
}

impl RestartRule {
    /// Decision entry point used by the supervisor: `rules` is the optional
    /// instruction map; absence of a map means "always restart".
    pub fn decide_default(rules: Option<&ExitRules>, code: i32) -> Result<RestartRule, PolicyError> {
        match rules {
            None => Ok(RestartRule::Restart),
            Some(r) => r.decide(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_map_means_restart() {
        assert_eq!(
            RestartRule::decide_default(None, 42).unwrap(),
            RestartRule::Restart
        );
    }

    #[test]
    fn entry_match_wins() {
        let rules = ExitRules::new()
            .with_rule(137, RestartRule::NoRestart)
            .with_fallback(RestartRule::Restart);
        assert_eq!(rules.decide(137).unwrap(), RestartRule::NoRestart);
    }

    #[test]
    fn fallback_covers_unlisted_codes() {
        let rules = ExitRules::new()
            .with_rule(1, RestartRule::DelayedRestart(Duration::from_millis(500)))
            .with_fallback(RestartRule::Restart);
        assert_eq!(rules.decide(7).unwrap(), RestartRule::Restart);
    }

    #[test]
    fn gap_without_fallback_is_an_error() {
        let rules = ExitRules::new().with_rule(0, RestartRule::NoRestart);
        assert_eq!(
            rules.decide(3),
            Err(PolicyError::UnmappedExitCode { code: 3 })
        );
    }

    #[test]
    fn later_rule_overwrites_earlier() {
        let rules = ExitRules::new()
            .with_rule(1, RestartRule::NoRestart)
            .with_rule(1, RestartRule::Restart);
        assert_eq!(rules.decide(1).unwrap(), RestartRule::Restart);
    }
}
