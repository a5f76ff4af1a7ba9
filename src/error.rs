//! Error types used by the forkvisor runtime.
//!
//! This module defines three error enums:
//!
//! - [`SpawnError`] — failures while creating a worker process.
//! - [`PolicyError`] — configuration gaps in the per-exit-code restart rules.
//! - [`RuntimeError`] — errors surfaced by [`Supervisor::run`](crate::Supervisor::run).
//!
//! All types provide `as_label()` returning a short stable snake_case label
//! for logs and metrics.

use thiserror::Error;

/// # Errors raised while spawning a worker process.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SpawnError {
    /// The underlying OS spawn failed (missing executable, permissions, limits).
    #[error("process spawn failed: {0}")]
    Io(#[from] std::io::Error),

    /// The spawned child did not expose the stdio pipes the IPC channel needs.
    #[error("child is missing the {stream} pipe")]
    MissingStdio {
        /// Which stream was absent ("stdin" or "stdout").
        stream: &'static str,
    },
}

impl SpawnError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SpawnError::Io(_) => "spawn_io",
            SpawnError::MissingStdio { .. } => "spawn_missing_stdio",
        }
    }
}

/// # Errors raised by the restart-rule decision.
///
/// A supplied instruction map is expected to cover every exit code it will
/// ever see, either with an explicit entry or a fallback rule. A gap is a
/// configuration error and is surfaced at decision time rather than being
/// silently treated as "restart".
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    /// The instruction map has no entry for this exit code and no fallback.
    #[error("no restart rule for exit code {code} and no fallback defined")]
    UnmappedExitCode {
        /// The exit code that had no usable rule.
        code: i32,
    },
}

impl PolicyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use forkvisor::PolicyError;
    ///
    /// let err = PolicyError::UnmappedExitCode { code: 3 };
    /// assert_eq!(err.as_label(), "policy_unmapped_exit_code");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PolicyError::UnmappedExitCode { .. } => "policy_unmapped_exit_code",
        }
    }
}

/// # Errors produced by the supervisor runtime itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Initial launch of a worker slot failed; the pool was never fully up.
    #[error("failed to launch worker slot {slot}: {source}")]
    Spawn {
        /// Ordinal slot id that failed to launch.
        slot: u32,
        /// Underlying spawn failure.
        #[source]
        source: SpawnError,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Spawn { .. } => "runtime_spawn_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Spawn { slot, source } => {
                format!("slot {slot} launch failed: {source}")
            }
        }
    }
}
